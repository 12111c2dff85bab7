#![allow(dead_code)]

pub const ACC_PUBLIC_SUPER: u16 = 0x0021;
pub const ACC_INTERFACE: u16 = 0x0601;
pub const ACC_ANNOTATION: u16 = 0x2601;
pub const ACC_ENUM: u16 = 0x4031;

/// Assembles a minimal class file (major version 52) declaring
/// `internal_name`, extending `java/lang/Object`, and annotated with the
/// given descriptors through a `RuntimeVisibleAnnotations` attribute.
pub fn class_bytes(internal_name: &str, access_flags: u16, annotations: &[&str]) -> Vec<u8> {
    fn utf8(pool: &mut Vec<Vec<u8>>, value: &str) -> u16 {
        let mut entry = vec![1u8];
        entry.extend((value.len() as u16).to_be_bytes());
        entry.extend(value.as_bytes());
        pool.push(entry);
        pool.len() as u16
    }

    let mut pool: Vec<Vec<u8>> = Vec::new();

    let this_name = utf8(&mut pool, internal_name);
    pool.push([vec![7u8], this_name.to_be_bytes().to_vec()].concat());
    let this_class = pool.len() as u16;

    let super_name = utf8(&mut pool, "java/lang/Object");
    pool.push([vec![7u8], super_name.to_be_bytes().to_vec()].concat());
    let super_class = pool.len() as u16;

    let attribute_name = utf8(&mut pool, "RuntimeVisibleAnnotations");
    let type_indexes: Vec<u16> = annotations
        .iter()
        .map(|descriptor| utf8(&mut pool, descriptor))
        .collect();

    let mut out = Vec::new();
    out.extend(0xCAFE_BABEu32.to_be_bytes());
    out.extend(0u16.to_be_bytes());
    out.extend(52u16.to_be_bytes());
    out.extend((pool.len() as u16 + 1).to_be_bytes());
    for entry in &pool {
        out.extend(entry);
    }
    out.extend(access_flags.to_be_bytes());
    out.extend(this_class.to_be_bytes());
    out.extend(super_class.to_be_bytes());
    out.extend(0u16.to_be_bytes()); // interfaces
    out.extend(0u16.to_be_bytes()); // fields
    out.extend(0u16.to_be_bytes()); // methods

    if type_indexes.is_empty() {
        out.extend(0u16.to_be_bytes());
    } else {
        out.extend(1u16.to_be_bytes());
        out.extend(attribute_name.to_be_bytes());
        let length = 2 + 4 * type_indexes.len() as u32;
        out.extend(length.to_be_bytes());
        out.extend((type_indexes.len() as u16).to_be_bytes());
        for index in type_indexes {
            out.extend(index.to_be_bytes());
            out.extend(0u16.to_be_bytes()); // element-value pairs
        }
    }
    out
}

/// Writes `bytes` under `root` at the slash-delimited `name`.
pub fn write_file(root: &std::path::Path, name: &str, bytes: &[u8]) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, bytes).expect("write file");
}
