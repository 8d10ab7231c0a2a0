//! User-Agent 粗粒度分类
//!
//! 使用 woothee 解析 OS 和设备类别。对任意输入（包括空串）保持
//! 确定性且不会 panic，解析不出来统一归为 "Unknown"。

use woothee::parser::Parser;

pub const UNKNOWN: &str = "Unknown";

/// 解析 User-Agent，返回 (os_type, device_type)
pub fn classify(ua: &str) -> (String, String) {
    let parser = Parser::new();

    match parser.parse(ua) {
        Some(result) => {
            let os_type = if result.os != "UNKNOWN" && !result.os.is_empty() {
                result.os.to_string()
            } else {
                UNKNOWN.to_string()
            };
            // woothee 的 category: pc / smartphone / mobilephone / appliance / crawler / misc
            let device_type = if result.category != "UNKNOWN" && !result.category.is_empty() {
                result.category.to_string()
            } else {
                UNKNOWN.to_string()
            };
            (os_type, device_type)
        }
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    }
}
