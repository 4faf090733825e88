
#[cfg(test)] use std::env;
#[cfg(test)] use std::fs;

#[cfg(test)]
fn working_path(input: &str) -> String {
    let path = env::temp_dir().join(input);
    if !fs::metadata(&path).is_ok() {
        match fs::create_dir_all(&path) {
            Ok(_) => {}
            Err(e) => {
                panic!("Failed to create directory: {}", e);
            }
        }
    }
    path.display().to_string()
}

#[cfg(test)]
fn remove_working_path(input: &str) {
    if fs::metadata(&input).is_ok() {
        match fs::remove_dir_all(&input) {
            Ok(_) => {}
            Err(e) => {
                panic!("Failed to remove directory: {}", e);
            }
        }
    }
}
