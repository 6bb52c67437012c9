use std::path::PathBuf;

pub const INPUT_PATH: &str = "./foo.json";
pub const ITERATIONS: u32 = 10_000;

/// What a run reads and how many times it parses it.
///
/// The binaries always use [`BenchConfig::default`]; there is no runtime override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub input_path: PathBuf,
    pub iterations: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_PATH),
            iterations: ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fixed() {
        let config = BenchConfig::default();
        assert_eq!(config.input_path, PathBuf::from("./foo.json"));
        assert_eq!(config.iterations, 10000);
    }
}
