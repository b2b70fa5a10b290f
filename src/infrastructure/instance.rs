// Infrastructure: problem instance files (TOML or JSON) for headless runs

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{TransportError, TransportInstance, TransportProblem};

#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Problem(#[from] TransportError),
}

/// Read an instance; `.json` files are JSON, anything else is TOML
pub fn load_instance(path: &Path) -> Result<TransportProblem, InstanceError> {
    let text = fs::read_to_string(path).map_err(|source| InstanceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let instance: TransportInstance = if is_json(path) {
        serde_json::from_str(&text).map_err(|source| InstanceError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::from_str(&text).map_err(|source| InstanceError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };

    Ok(TransportProblem::try_from(instance)?)
}

/// TOML text of `problem`, in the shape `load_instance` reads back
pub fn render_instance(problem: &TransportProblem) -> Result<String, toml::ser::Error> {
    toml::to_string(&problem.to_instance())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("p.toml");
        fs::write(
            &toml_path,
            "supply = [20.0, 30.0]\ndemand = [25.0, 25.0]\ncosts = [[8.0, 6.0], [9.0, 12.0]]\n",
        )
        .unwrap();
        let from_toml = load_instance(&toml_path).unwrap();

        let json_path = dir.path().join("p.json");
        let mut file = fs::File::create(&json_path).unwrap();
        write!(
            file,
            r#"{{"supply":[20,30],"demand":[25,25],"costs":[[8,6],[9,12]]}}"#
        )
        .unwrap();
        let from_json = load_instance(&json_path).unwrap();

        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.dimensions().factories(), 2);
    }

    #[test]
    fn rendered_instance_loads_back() {
        let problem =
            TransportProblem::new(vec![1.5, 2.0], vec![3.5], vec![vec![4.0], vec![0.5]]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round.toml");
        fs::write(&path, render_instance(&problem).unwrap()).unwrap();

        assert_eq!(load_instance(&path).unwrap(), problem);
    }

    #[test]
    fn shape_errors_surface_as_problem_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "supply = [1.0]\ndemand = [1.0]\ncosts = [[1.0, 2.0]]\n").unwrap();

        assert!(matches!(
            load_instance(&path),
            Err(InstanceError::Problem(TransportError::ShapeMismatch { .. }))
        ));
    }
}
