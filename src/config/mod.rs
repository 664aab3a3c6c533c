//! 配置管理
//!
//! 配置按 `config.toml` → `config.{APP_ENV}.toml` → `PORTAL_*` 环境变量的顺序叠加，
//! 所有字段都带有默认值。

mod r#impl;
mod structs;

pub use structs::*;
