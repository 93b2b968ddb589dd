//! Convenience macros for diagnostics.

/// Log an event with the given level, prefixed with the calling module.
///
/// Extra `key => value` pairs are rendered as `key=value` metadata after
/// the message.
///
/// # Examples
///
/// ```
/// use sepol_core::log_event;
/// use sepol_core::utils::LogLevel;
///
/// log_event!(LogLevel::Info, "policy loaded");
/// log_event!(LogLevel::Debug, "translated record",
///     kind => "class",
///     name => "file",
/// );
/// ```
#[macro_export]
macro_rules! log_event {
    ($level:expr, $message:expr) => {
        {
            use $crate::utils::LogLevel;
            match $level {
                LogLevel::Error => log::error!("[{}] {}", module_path!(), $message),
                LogLevel::Warning => log::warn!("[{}] {}", module_path!(), $message),
                LogLevel::Info => log::info!("[{}] {}", module_path!(), $message),
                LogLevel::Debug => log::debug!("[{}] {}", module_path!(), $message),
                LogLevel::Trace => log::trace!("[{}] {}", module_path!(), $message),
            }
        }
    };

    ($level:expr, $message:expr, $($key:ident => $value:expr),+ $(,)?) => {
        {
            use $crate::utils::LogLevel;
            let metadata = vec![$(format!("{}={}", stringify!($key), $value)),+].join(" ");
            match $level {
                LogLevel::Error => log::error!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Warning => log::warn!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Info => log::info!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Debug => log::debug!("[{}] {}: {}", module_path!(), $message, metadata),
                LogLevel::Trace => log::trace!("[{}] {}: {}", module_path!(), $message, metadata),
            }
        }
    };
}

/// Unwrap a result, reporting the error through a `Handle` before
/// returning it from the enclosing function.
///
/// # Examples
///
/// ```
/// use sepol_core::{try_report, Handle, Result};
/// use sepol_core::error::TranslationError;
///
/// fn lookup(handle: &Handle, found: Option<&str>) -> Result<String> {
///     let name = try_report!(
///         handle,
///         found.ok_or(TranslationError::UnknownValue { table: "type", value: 3 })
///     );
///     Ok(name.to_string())
/// }
///
/// let handle = Handle::new();
/// assert!(lookup(&handle, Some("TYPE1")).is_ok());
/// assert!(lookup(&handle, None).is_err());
/// ```
#[macro_export]
macro_rules! try_report {
    ($handle:expr, $result:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => {
                let err = $crate::Error::from(e);
                $handle.err(&err);
                return Err(err);
            }
        }
    };

    ($handle:expr, $result:expr, $context:expr) => {
        match $result {
            Ok(val) => val,
            Err(e) => {
                let err = $crate::Error::from(e);
                $handle.err(format!("{}: {}", $context, err));
                return Err(err);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, PolicyError, Result};
    use crate::Handle;

    fn checked(handle: &Handle, value: Option<u32>) -> Result<u32> {
        let v = try_report!(handle, value.ok_or(PolicyError::MissingField("value")));
        Ok(v + 1)
    }

    fn checked_with_context(handle: &Handle, value: Option<u32>) -> Result<u32> {
        let v = try_report!(
            handle,
            value.ok_or(PolicyError::MissingField("value")),
            "reading value"
        );
        Ok(v)
    }

    #[test]
    fn test_try_report_passes_values_through() {
        let handle = Handle::new();
        assert_eq!(checked(&handle, Some(1)).unwrap(), 2);
        assert_eq!(checked_with_context(&handle, Some(5)).unwrap(), 5);
    }

    #[test]
    fn test_try_report_returns_converted_error() {
        let handle = Handle::new();
        assert!(matches!(
            checked(&handle, None),
            Err(Error::Policy(PolicyError::MissingField("value")))
        ));
        assert!(checked_with_context(&handle, None).is_err());
    }

    #[test]
    fn test_log_event_forms_compile() {
        use crate::utils::LogLevel;
        log_event!(LogLevel::Trace, "plain");
        log_event!(LogLevel::Warning, "with metadata", kind => "type", count => 3);
    }
}
