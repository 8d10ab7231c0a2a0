//! 客户端 IP 选择
//!
//! 优先取 forwarded-for 请求头的第一个地址（即原始客户端 IP），
//! 回退到传输层对端地址。两者都是边界层透传的不透明字符串。

use crate::analytics::ClientContext;

/// 从调用方上下文选择记录用的客户端 IP
pub fn client_ip(ctx: &ClientContext) -> Option<String> {
    ctx.forwarded_for
        .as_deref()
        .and_then(|value| value.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| ctx.remote_addr.clone())
}
