use fathom_api::TypeHandle;
use fathom_core::{Resource, TypedRecord};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// A row per resource
#[derive(Tabled, Serialize)]
pub struct ResourceView {
    pub context: String,
    pub kind: &'static str,
    pub name: String,
}

impl ResourceView {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            context: resource.owner().name().to_string(),
            kind: if resource.is_typed() { "type" } else { "resource" },
            name: resource.name().to_string(),
        }
    }
}

/// A row per type, split into package and simple name
#[derive(Tabled, Serialize)]
pub struct TypeView {
    pub context: String,
    pub package: String,
    #[tabled(rename = "simple name")]
    pub simple_name: String,
    #[tabled(rename = "type")]
    pub type_name: String,
}

impl TypeView {
    pub fn from_record(record: &TypedRecord) -> Self {
        Self {
            context: record.owner().name().to_string(),
            package: display_package(record.package_name()),
            simple_name: record.simple_name().to_string(),
            type_name: record.type_name().to_string(),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct HandleView {
    pub kind: String,
    pub name: String,
    pub tags: String,
}

impl HandleView {
    pub fn from_handle(handle: &TypeHandle) -> Self {
        Self {
            kind: handle.kind.as_str().to_string(),
            name: handle.name.clone(),
            tags: handle
                .tags
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn display_package(package: &str) -> String {
    if package.is_empty() {
        "<root>".to_string()
    } else {
        package.to_string()
    }
}

pub fn print_rows<T: Tabled + Serialize>(
    rows: &[T],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else if rows.is_empty() {
        println!("No results.");
    } else {
        println!("{}", Table::new(rows).with(Style::psql()));
        println!("{} row(s)", rows.len());
    }
    Ok(())
}
