//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_taskhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TaskHubError {
            $($variant(String),)*
        }

        impl TaskHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TaskHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TaskHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TaskHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TaskHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TaskHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_taskhub_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    DuplicateKey("E004", "Duplicate Key Conflict"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    DeadlineExceeded("E007", "Deadline Exceeded"),
    LockedForGrading("E008", "Locked For Grading"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
}

impl TaskHubError {
    /// 重复键冲突属于增长操作可容忍的冲突，调用方据此决定是否吞掉
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, TaskHubError::DuplicateKey(_))
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TaskHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TaskHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TaskHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一索引冲突单独归类，同步引擎的插入路径需要区分对待
        if matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ) {
            TaskHubError::DuplicateKey(err.to_string())
        } else {
            TaskHubError::DatabaseOperation(err.to_string())
        }
    }
}

impl From<std::io::Error> for TaskHubError {
    fn from(err: std::io::Error) -> Self {
        TaskHubError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TaskHubError {
    fn from(err: serde_json::Error) -> Self {
        TaskHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TaskHubError {
    fn from(err: chrono::ParseError) -> Self {
        TaskHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TaskHubError::database_config("test").code(), "E001");
        assert_eq!(TaskHubError::duplicate_key("test").code(), "E004");
        assert_eq!(TaskHubError::validation("test").code(), "E005");
        assert_eq!(TaskHubError::deadline_exceeded("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TaskHubError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            TaskHubError::locked_for_grading("test").error_type(),
            "Locked For Grading"
        );
    }

    #[test]
    fn test_duplicate_key_classification() {
        assert!(TaskHubError::duplicate_key("grades").is_duplicate_key());
        assert!(!TaskHubError::database_operation("timeout").is_duplicate_key());
    }

    #[test]
    fn test_format_simple() {
        let err = TaskHubError::validation("due date before publish date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("due date before publish date"));
    }
}
