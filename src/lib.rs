//! School Portal - 学校门户后端服务
//!
//! 基于 Actix Web 构建的招生、成绩录入与成绩单后端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），保存会话、重置令牌
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话、主体类型与限流中间件
//! - `models`: 数据模型定义
//! - `notifier`: 外发通知（日志 / 发件箱目录）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod notifier;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
