//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//!
//! 引擎表（grades/submissions/成员关系表）之间刻意不声明数据库级联，
//! 跨表一致性由 services::sync 与 services::cascade 程序化维护。

pub mod prelude;

pub mod batch_students;
pub mod batches;
pub mod course_batches;
pub mod course_faculty;
pub mod courses;
pub mod grades;
pub mod students;
pub mod submissions;
pub mod tasks;
