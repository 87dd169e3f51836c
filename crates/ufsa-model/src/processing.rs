use serde::{Deserialize, Serialize};

/// Artifacts produced by one pipeline run, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub outputs: Vec<String>,
}

impl PipelineResult {
    pub fn push(&mut self, path: impl Into<String>) {
        self.outputs.push(path.into());
    }

    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.extend(paths.into_iter().map(Into::into));
    }

    /// True when an artifact with this file name was produced.
    pub fn contains_file(&self, file_name: &str) -> bool {
        self.outputs.iter().any(|output| {
            std::path::Path::new(output)
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name == file_name)
        })
    }
}
