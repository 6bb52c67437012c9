use crate::error::BenchError;
use crate::native;

/// A JSON parser the runner can time.
pub trait Backend {
    /// Name printed at the start of the report line.
    const LABEL: &'static str;

    type Output<'input>;

    /// Fully parses `input` into a value tree.
    fn parse<'input>(&self, input: &'input [u8]) -> Result<Self::Output<'input>, BenchError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeBackend;

impl Backend for SerdeBackend {
    const LABEL: &'static str = "JSON.parse";

    type Output<'input> = serde_json::Value;

    fn parse<'input>(&self, input: &'input [u8]) -> Result<Self::Output<'input>, BenchError> {
        Ok(serde_json::from_slice(input)?)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl Backend for NativeBackend {
    const LABEL: &'static str = "native parse";

    type Output<'input> = native::JsonValue<'input>;

    fn parse<'input>(&self, input: &'input [u8]) -> Result<Self::Output<'input>, BenchError> {
        Ok(native::from_slice(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_backend() {
        let value = SerdeBackend.parse(br#"{"a":1}"#).unwrap();
        assert_eq!(value["a"], serde_json::json!(1));

        let err = SerdeBackend.parse(br#"{"a":"#).unwrap_err();
        assert!(matches!(err, BenchError::Parse(_)));
    }

    #[test]
    fn native_backend() {
        let value = NativeBackend.parse(br#"{"a":1}"#).unwrap();
        assert_eq!(value["a"].as_f64(), Some(1.0));

        let err = NativeBackend.parse(br#"{"a":"#).unwrap_err();
        assert!(matches!(
            err,
            BenchError::Native(native::ParserError::UnexpectedEnd)
        ));
    }

    #[test]
    fn backends_agree_on_sample() {
        let input = include_bytes!("../foo.json");
        let serde = SerdeBackend.parse(input).unwrap();
        let ours = NativeBackend.parse(input).unwrap();
        assert_eq!(
            serde["web-app"]["servlet"][0]["servlet-name"].as_str(),
            ours["web-app"]["servlet"][0]["servlet-name"].as_str()
        );
        assert_eq!(
            serde["web-app"]["servlet"][0]["init-param"]["maxUrlLength"].as_f64(),
            ours["web-app"]["servlet"][0]["init-param"]["maxUrlLength"].as_f64()
        );
    }
}
