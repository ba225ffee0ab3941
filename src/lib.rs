//! TaskHub - 学务任务管理平台后端服务
//!
//! 基于 Actix Web 构建的任务与成绩同步管理系统后端。
//! 核心是注册⇒成绩占位的同步引擎：课程的有效注册集合由批次
//! 成员实时解析，成绩占位行随注册变化增长与收缩。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（注册解析、占位同步、级联删除）
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
