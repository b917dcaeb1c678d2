use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};

use super::graph::RawGraph;

pub fn load_dataset(path: &Path) -> Result<RawGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))
}

pub(super) fn parse_dataset(raw: &str) -> Result<RawGraph> {
    let graph: RawGraph = serde_json::from_str(raw).context("invalid reconstruction JSON")?;

    if let Some(index) = graph
        .modules
        .iter()
        .position(|module| module.mccabe.iter().any(|a| !a.complexity.is_finite()))
    {
        return Err(anyhow!(
            "module {} carries a non-finite complexity",
            graph.modules[index].name
        ));
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "modules": [
            {"moduleName": "scrapy.core", "external": false,
             "mccabe": [{"artifact": "Engine.start", "complexity": 4}]},
            {"moduleName": "twisted", "external": true, "mccabe": []}
        ],
        "requires": [["scrapy.core", "twisted"]]
    }"#;

    #[test]
    fn parses_modules_and_requires() {
        let graph = parse_dataset(SAMPLE).unwrap();
        assert_eq!(graph.modules.len(), 2);
        assert_eq!(graph.modules[0].name.as_str(), "scrapy.core");
        assert_eq!(graph.modules[0].mccabe[0].complexity, 4.0);
        assert!(graph.modules[1].external);
        assert_eq!(graph.requires[0].from, "scrapy.core");
        assert_eq!(graph.requires[0].to, "twisted");
    }

    #[test]
    fn missing_module_name_is_fatal() {
        let raw = r#"{"modules": [{"external": false, "mccabe": []}], "requires": []}"#;
        assert!(parse_dataset(raw).is_err());
    }

    #[test]
    fn malformed_edge_is_fatal() {
        let raw = r#"{"modules": [], "requires": [["only-one"]]}"#;
        assert!(parse_dataset(raw).is_err());
    }

    #[test]
    fn loads_from_disk_with_path_in_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let graph = load_dataset(file.path()).unwrap();
        assert_eq!(graph.requires.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("reconstruction.json");
        let error = load_dataset(&missing).unwrap_err();
        assert!(format!("{error:#}").contains("reconstruction.json"));
    }
}
