use std::path::Path;

pub fn write_file(dir: &Path, file_name: &str, content: &str) {
    let file_path = dir.join(file_name);
    std::fs::write(&file_path, content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_path, e));
}

pub fn read_file(dir: &Path, file_name: &str) -> String {
    let file_path = dir.join(file_name);
    std::fs::read_to_string(&file_path)
        .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", file_path, e))
}

pub fn delete_file(dir: &Path, file_name: &str) {
    let file_path = dir.join(file_name);
    std::fs::remove_file(&file_path)
        .unwrap_or_else(|e| panic!("Failed to delete file {:?}: {}", file_path, e));
}

/// A few random words, different on every call
pub fn generated_content() -> String {
    use fake::{Fake, faker::lorem::en::Words};

    let mut content = Words(5..10).fake::<Vec<String>>().join(" ");
    content.push('\n');
    content
}
