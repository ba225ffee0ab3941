//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod batches;
mod courses;
mod grades;
mod memberships;
mod students;
mod submissions;
mod tasks;

use crate::config::AppConfig;
use crate::errors::{Result, TaskHubError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例（连接 URL 来自全局配置）
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(&config.database.url, config.database.pool_size, config.database.timeout)
            .await
    }

    /// 从指定连接 URL 创建存储实例并运行迁移
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TaskHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TaskHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TaskHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TaskHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 测试用内存数据库
    pub(crate) async fn new_in_memory() -> Self {
        Self::new_with_url(":memory:", 1, 5)
            .await
            .expect("in-memory storage")
    }
}

// Storage trait 实现
use crate::models::{
    batches::{
        entities::Batch,
        requests::{BatchListQuery, CreateBatchRequest, UpdateBatchRequest},
        responses::BatchListResponse,
    },
    common::actor::ActorRef,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    grades::{entities::Grade, requests::GradeListQuery, responses::GradeListResponse},
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    submissions::{
        entities::{Lateness, Submission},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
    tasks::{
        entities::Task,
        requests::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
        responses::TaskListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student_row(&self, id: i64) -> Result<bool> {
        self.delete_student_row_impl(id).await
    }

    // 批次模块
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch> {
        self.create_batch_impl(batch).await
    }

    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>> {
        self.get_batch_by_id_impl(batch_id).await
    }

    async fn find_batch_by_unique(
        &self,
        name: &str,
        academic_year: &str,
        department: &str,
    ) -> Result<Option<Batch>> {
        self.find_batch_by_unique_impl(name, academic_year, department)
            .await
    }

    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse> {
        self.list_batches_with_pagination_impl(query).await
    }

    async fn update_batch(
        &self,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>> {
        self.update_batch_impl(batch_id, update).await
    }

    async fn delete_batch_row(&self, batch_id: i64) -> Result<bool> {
        self.delete_batch_row_impl(batch_id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>> {
        self.get_course_by_code_impl(code).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course_row(&self, course_id: i64) -> Result<bool> {
        self.delete_course_row_impl(course_id).await
    }

    // 任务模块
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task> {
        self.create_task_impl(task).await
    }

    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>> {
        self.get_task_by_id_impl(task_id).await
    }

    async fn list_tasks_by_course(&self, course_id: i64) -> Result<Vec<Task>> {
        self.list_tasks_by_course_impl(course_id).await
    }

    async fn list_tasks_with_pagination(&self, query: TaskListQuery) -> Result<TaskListResponse> {
        self.list_tasks_with_pagination_impl(query).await
    }

    async fn update_task(&self, task_id: i64, update: UpdateTaskRequest) -> Result<Option<Task>> {
        self.update_task_impl(task_id, update).await
    }

    async fn delete_task_row(&self, task_id: i64) -> Result<bool> {
        self.delete_task_row_impl(task_id).await
    }

    // 成员关系模块
    async fn add_student_to_batch(&self, batch_id: i64, student_id: i64) -> Result<bool> {
        self.add_student_to_batch_impl(batch_id, student_id).await
    }

    async fn remove_student_from_batch(&self, batch_id: i64, student_id: i64) -> Result<bool> {
        self.remove_student_from_batch_impl(batch_id, student_id)
            .await
    }

    async fn list_student_ids_of_batch(&self, batch_id: i64) -> Result<Vec<i64>> {
        self.list_student_ids_of_batch_impl(batch_id).await
    }

    async fn list_batch_ids_of_student(&self, student_id: i64) -> Result<Vec<i64>> {
        self.list_batch_ids_of_student_impl(student_id).await
    }

    async fn remove_student_from_all_batches(&self, student_id: i64) -> Result<u64> {
        self.remove_student_from_all_batches_impl(student_id).await
    }

    async fn clear_batch_students(&self, batch_id: i64) -> Result<u64> {
        self.clear_batch_students_impl(batch_id).await
    }

    async fn attach_batch_to_course(&self, course_id: i64, batch_id: i64) -> Result<bool> {
        self.attach_batch_to_course_impl(course_id, batch_id).await
    }

    async fn detach_batch_from_course(&self, course_id: i64, batch_id: i64) -> Result<bool> {
        self.detach_batch_from_course_impl(course_id, batch_id)
            .await
    }

    async fn list_batch_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>> {
        self.list_batch_ids_of_course_impl(course_id).await
    }

    async fn list_course_ids_of_batch(&self, batch_id: i64) -> Result<Vec<i64>> {
        self.list_course_ids_of_batch_impl(batch_id).await
    }

    async fn detach_batch_from_all_courses(&self, batch_id: i64) -> Result<u64> {
        self.detach_batch_from_all_courses_impl(batch_id).await
    }

    async fn clear_course_batches(&self, course_id: i64) -> Result<u64> {
        self.clear_course_batches_impl(course_id).await
    }

    async fn add_faculty_to_course(&self, course_id: i64, faculty_id: i64) -> Result<bool> {
        self.add_faculty_to_course_impl(course_id, faculty_id).await
    }

    async fn remove_faculty_from_course(&self, course_id: i64, faculty_id: i64) -> Result<bool> {
        self.remove_faculty_from_course_impl(course_id, faculty_id)
            .await
    }

    async fn list_faculty_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>> {
        self.list_faculty_ids_of_course_impl(course_id).await
    }

    async fn clear_course_faculty(&self, course_id: i64) -> Result<u64> {
        self.clear_course_faculty_impl(course_id).await
    }

    // 成绩模块
    async fn insert_missing_grades(
        &self,
        task_id: i64,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        self.insert_missing_grades_impl(task_id, course_id, student_ids)
            .await
    }

    async fn delete_grades_for_students(&self, task_id: i64, student_ids: &[i64]) -> Result<u64> {
        self.delete_grades_for_students_impl(task_id, student_ids)
            .await
    }

    async fn delete_grades_by_task(&self, task_id: i64) -> Result<u64> {
        self.delete_grades_by_task_impl(task_id).await
    }

    async fn delete_grades_by_student(&self, student_id: i64) -> Result<u64> {
        self.delete_grades_by_student_impl(student_id).await
    }

    async fn delete_grades_by_course(&self, course_id: i64) -> Result<u64> {
        self.delete_grades_by_course_impl(course_id).await
    }

    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(grade_id).await
    }

    async fn get_grade_by_task_and_student(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Grade>> {
        self.get_grade_by_task_and_student_impl(task_id, student_id)
            .await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn list_graded_student_ids(&self, task_id: i64) -> Result<Vec<i64>> {
        self.list_graded_student_ids_impl(task_id).await
    }

    async fn apply_grade_update(
        &self,
        grade_id: i64,
        grade: Option<f64>,
        feedback: Option<String>,
        grader: ActorRef,
    ) -> Result<Option<Grade>> {
        self.apply_grade_update_impl(grade_id, grade, feedback, grader)
            .await
    }

    async fn link_submission(
        &self,
        task_id: i64,
        student_id: i64,
        submission_id: Option<i64>,
    ) -> Result<bool> {
        self.link_submission_impl(task_id, student_id, submission_id)
            .await
    }

    // 提交模块
    async fn create_submission(
        &self,
        task_id: i64,
        student_id: i64,
        content: String,
        attachments: &[String],
        lateness: Lateness,
    ) -> Result<Submission> {
        self.create_submission_impl(task_id, student_id, content, attachments, lateness)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_task_and_student(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_task_and_student_impl(task_id, student_id)
            .await
    }

    async fn update_submission_content(
        &self,
        submission_id: i64,
        content: String,
        attachments: &[String],
    ) -> Result<Option<Submission>> {
        self.update_submission_content_impl(submission_id, content, attachments)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn delete_submissions_by_task(&self, task_id: i64) -> Result<u64> {
        self.delete_submissions_by_task_impl(task_id).await
    }

    async fn delete_submissions_by_student(&self, student_id: i64) -> Result<u64> {
        self.delete_submissions_by_student_impl(student_id).await
    }

    async fn delete_submissions_for_students(
        &self,
        task_id: i64,
        student_ids: &[i64],
    ) -> Result<u64> {
        self.delete_submissions_for_students_impl(task_id, student_ids)
            .await
    }

    async fn list_submitted_student_ids(&self, task_id: i64) -> Result<Vec<i64>> {
        self.list_submitted_student_ids_impl(task_id).await
    }
}
