// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use budget_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_file_format() {
        let err = CoreError::InvalidFileFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid file format: bad header");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported file version: 99");
    }

    #[test]
    fn encryption() {
        let err = CoreError::Encryption("AES key size invalid".into());
        assert_eq!(err.to_string(), "Encryption failed: AES key size invalid");
    }

    #[test]
    fn decryption() {
        let err = CoreError::Decryption;
        assert_eq!(
            err.to_string(),
            "Decryption failed — wrong password or corrupted file"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bincode failed".into());
        assert_eq!(err.to_string(), "Serialization error: bincode failed");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("quota exceeded".into());
        assert_eq!(err.to_string(), "Storage error: quota exceeded");
    }

    #[test]
    fn invalid_backup() {
        let err = CoreError::InvalidBackup("malformed JSON".into());
        assert_eq!(err.to_string(), "Backup could not be restored: malformed JSON");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "Gemini".into(),
            message: "HTTP 429 Too Many Requests".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (Gemini): HTTP 429 Too Many Requests"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn advice_unavailable() {
        let err = CoreError::AdviceUnavailable("no advice provider configured".into());
        assert_eq!(
            err.to_string(),
            "Advice is unavailable: no advice provider configured"
        );
    }

    #[test]
    fn validation() {
        let err = CoreError::ValidationError("Transaction description is required".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Transaction description is required"
        );
    }

    #[test]
    fn duplicate_budget() {
        let err = CoreError::DuplicateBudget("Food".into());
        assert_eq!(err.to_string(), "A budget for category 'Food' already exists");
    }

    #[test]
    fn not_found_variants() {
        assert_eq!(
            CoreError::TransactionNotFound("abc".into()).to_string(),
            "Transaction not found: abc"
        );
        assert_eq!(
            CoreError::BudgetNotFound("abc".into()).to_string(),
            "Budget not found: abc"
        );
        assert_eq!(
            CoreError::CategoryNotFound("abc".into()).to_string(),
            "Category not found: abc"
        );
    }
}

// ── From conversions ────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io.into();
        match err {
            CoreError::FileIO(msg) => assert!(msg.contains("no such file")),
            other => panic!("Expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_bincode_error() {
        let bin_err = bincode::deserialize::<String>(&[0xFF]).unwrap_err();
        let err: CoreError = bin_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn from_reqwest_error_redacts_query() {
        let req_err = reqwest::Client::new()
            .get("http://127.0.0.1:9/models?key=secret-value")
            .send()
            .await
            .unwrap_err();
        let err: CoreError = req_err.into();
        match err {
            CoreError::Network(msg) => {
                assert!(!msg.contains("secret-value"), "{msg}");
            }
            other => panic!("Expected Network, got {other:?}"),
        }
    }

    #[test]
    fn from_aes_gcm_error_is_decryption() {
        let err: CoreError = aes_gcm::Error.into();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn question_mark_propagates_io() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/path.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Decryption);
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn debug_includes_variant_name() {
        let err = CoreError::DuplicateBudget("Food".into());
        assert!(format!("{err:?}").contains("DuplicateBudget"));
    }
}
