use std::fs;
use std::path::Path;

use ufsa_model::Standard;

pub fn write_fixture(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

pub fn standard(id: &str, relative: &str, parser_module: &str, data_format: &str) -> Standard {
    Standard {
        standard_id: id.to_string(),
        name: format!("{id} name"),
        governing_body: "Test Body".to_string(),
        specification_url: format!("fixtures://{relative}"),
        data_format: data_format.to_string(),
        parser_module: parser_module.to_string(),
        concept_scheme_uri: format!("http://ufsa.org/v2/standards/{id}"),
    }
}
