//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use wfc3d::AlgorithmError;
    use wfc3d::io::error::invalid_parameter;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = AlgorithmError::FileSystem {
            path: "/tmp/modules.json".into(),
            operation: "read manifest",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read manifest"));
        assert!(message.contains("/tmp/modules.json"));
    }

    // Tests errors without an underlying cause have no source
    // Verified by returning a source for every variant
    #[test]
    fn test_plain_errors_have_no_source() {
        assert!(AlgorithmError::EmptyModuleList.source().is_none());
        let unknown = AlgorithmError::UnknownModule {
            name: "Pillar".to_string(),
        };
        assert!(unknown.source().is_none());
        assert!(unknown.to_string().contains("Pillar"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("grid_size", &"0x1x1", &"must be positive");

        let message = error.to_string();
        assert!(message.contains("grid_size"));
        assert!(message.contains("0x1x1"));
        assert!(message.contains("must be positive"));
    }

    // Tests JSON failures convert into manifest parse errors with a source
    // Verified by dropping the JSON error from the source chain
    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let error = AlgorithmError::from(json_error);
        assert!(matches!(error, AlgorithmError::ManifestParse { .. }));
        assert!(error.source().is_some());
    }

    // Tests report export errors name the report path
    // Verified by formatting the manifest message instead
    #[test]
    fn test_report_export_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let error = AlgorithmError::ReportExport {
            path: PathBuf::from("out/tower_result.json"),
            source: json_error,
        };
        let message = error.to_string();
        assert!(message.contains("write report"));
        assert!(message.contains("tower_result.json"));
        assert!(error.source().is_some());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = AlgorithmError::ImageExport {
            path: PathBuf::from("/restricted/tower_layers.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/tower_layers.png"));
        assert!(error.source().is_some());
        assert!(
            message.contains("access denied"),
            "Error message should include source error details: {message}"
        );
    }

    // Tests io errors convert into file system errors
    // Verified by mapping io errors to a different variant
    #[test]
    fn test_io_error_conversion() {
        let error = AlgorithmError::from(std::io::Error::other("disk full"));
        assert!(matches!(error, AlgorithmError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }
}
