use std::fmt;

#[derive(Debug, Clone)]
pub enum LinklyticsError {
    /// 别名在缓存和存储中都不存在（业务结果，不是故障）
    NotFound(String),
    /// 别名已被占用（自定义别名重复，或随机别名撞上唯一约束）
    Conflict(String),
    Validation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    CacheConnection(String),
    Serialization(String),
}

impl LinklyticsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinklyticsError::NotFound(_) => "E001",
            LinklyticsError::Conflict(_) => "E002",
            LinklyticsError::Validation(_) => "E003",
            LinklyticsError::DatabaseConfig(_) => "E004",
            LinklyticsError::DatabaseConnection(_) => "E005",
            LinklyticsError::DatabaseOperation(_) => "E006",
            LinklyticsError::CacheConnection(_) => "E007",
            LinklyticsError::Serialization(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinklyticsError::NotFound(_) => "Resource Not Found",
            LinklyticsError::Conflict(_) => "Alias Conflict",
            LinklyticsError::Validation(_) => "Validation Error",
            LinklyticsError::DatabaseConfig(_) => "Database Configuration Error",
            LinklyticsError::DatabaseConnection(_) => "Database Connection Error",
            LinklyticsError::DatabaseOperation(_) => "Database Operation Error",
            LinklyticsError::CacheConnection(_) => "Cache Connection Error",
            LinklyticsError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinklyticsError::NotFound(msg)
            | LinklyticsError::Conflict(msg)
            | LinklyticsError::Validation(msg)
            | LinklyticsError::DatabaseConfig(msg)
            | LinklyticsError::DatabaseConnection(msg)
            | LinklyticsError::DatabaseOperation(msg)
            | LinklyticsError::CacheConnection(msg)
            | LinklyticsError::Serialization(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinklyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinklyticsError {}

// 便捷的构造函数
impl LinklyticsError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::Conflict(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::Validation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::DatabaseOperation(msg.into())
    }

    pub fn cache_connection<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::CacheConnection(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinklyticsError::Serialization(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinklyticsError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinklyticsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinklyticsError {
    fn from(err: serde_json::Error) -> Self {
        LinklyticsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinklyticsError>;
