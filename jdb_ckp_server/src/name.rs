//! Checkpoint name check / 检查点名称校验

use crate::{Error, Result};

/// Engine default checkpoint name, also a reserved prefix
/// 引擎默认检查点名称，同时是保留前缀
pub const DEFAULT_NAME: &str = "JdbCheckpoint";

/// Grouping and quoting characters the config layer treats specially
/// 配置层有特殊含义的分组与引号字符
const FORBID: &[char] = &['{', '}', ',', ':', '[', ']', '\\', '"', '\''];

/// Resolve a configured name into an override
/// 将配置的名称解析为覆盖值
///
/// Empty or default name yields `None`.
/// 空名称或默认名称返回 `None`。
pub fn resolve(name: &str) -> Result<Option<String>> {
  if name.is_empty() || name == DEFAULT_NAME {
    return Ok(None);
  }
  check(name)?;
  Ok(Some(name.to_owned()))
}

/// Reject names applications may not use
/// 拒绝应用不可使用的名称
pub fn check(name: &str) -> Result<()> {
  let bad = |reason| {
    Err(Error::InvalidName {
      name: name.to_owned(),
      reason,
    })
  };

  if name.starts_with(DEFAULT_NAME) {
    return bad("reserved prefix");
  }
  if name.contains(FORBID) {
    return bad("grouping character");
  }
  if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
    return bad("whitespace or control character");
  }
  Ok(())
}
