use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 实体存储抽象
///
/// 每个集合只提供单文档原子性的 CRUD 原语；跨集合一致性
/// （注册⇒成绩占位、级联删除）由 services 层的同步引擎编排。
/// 负责"增长"的插入原语必须容忍重复键（唯一索引即并发保护）。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过邮箱获取学生信息
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 更新学生信息
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    // 删除学生行（级联由 services::cascade 编排）
    async fn delete_student_row(&self, id: i64) -> Result<bool>;

    /// 批次管理方法
    // 创建批次
    async fn create_batch(&self, batch: CreateBatchRequest) -> Result<Batch>;
    // 通过ID获取批次信息
    async fn get_batch_by_id(&self, batch_id: i64) -> Result<Option<Batch>>;
    // 按 (名称, 学年, 院系) 唯一键查批次
    async fn find_batch_by_unique(
        &self,
        name: &str,
        academic_year: &str,
        department: &str,
    ) -> Result<Option<Batch>>;
    // 列出批次
    async fn list_batches_with_pagination(
        &self,
        query: BatchListQuery,
    ) -> Result<BatchListResponse>;
    // 更新批次信息
    async fn update_batch(
        &self,
        batch_id: i64,
        update: UpdateBatchRequest,
    ) -> Result<Option<Batch>>;
    // 删除批次行
    async fn delete_batch_row(&self, batch_id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程代码获取课程信息
    async fn get_course_by_code(&self, code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程行
    async fn delete_course_row(&self, course_id: i64) -> Result<bool>;

    /// 任务管理方法
    // 创建任务
    async fn create_task(&self, task: CreateTaskRequest) -> Result<Task>;
    // 通过ID获取任务信息
    async fn get_task_by_id(&self, task_id: i64) -> Result<Option<Task>>;
    // 课程下的全部任务
    async fn list_tasks_by_course(&self, course_id: i64) -> Result<Vec<Task>>;
    // 列出任务
    async fn list_tasks_with_pagination(&self, query: TaskListQuery) -> Result<TaskListResponse>;
    // 更新任务信息
    async fn update_task(&self, task_id: i64, update: UpdateTaskRequest) -> Result<Option<Task>>;
    // 删除任务行
    async fn delete_task_row(&self, task_id: i64) -> Result<bool>;

    /// 成员关系方法（批次↔学生、课程↔批次、课程↔教师）
    // 学生加入批次；已在批次中返回 false（幂等）
    async fn add_student_to_batch(&self, batch_id: i64, student_id: i64) -> Result<bool>;
    // 学生移出批次
    async fn remove_student_from_batch(&self, batch_id: i64, student_id: i64) -> Result<bool>;
    // 批次成员列表
    async fn list_student_ids_of_batch(&self, batch_id: i64) -> Result<Vec<i64>>;
    // 学生所在批次列表
    async fn list_batch_ids_of_student(&self, student_id: i64) -> Result<Vec<i64>>;
    // 把学生从所有批次移除（学生级联）
    async fn remove_student_from_all_batches(&self, student_id: i64) -> Result<u64>;
    // 清空批次成员（批次级联）
    async fn clear_batch_students(&self, batch_id: i64) -> Result<u64>;
    // 批次挂接到课程；已挂接返回 false（幂等）
    async fn attach_batch_to_course(&self, course_id: i64, batch_id: i64) -> Result<bool>;
    // 批次从课程摘除
    async fn detach_batch_from_course(&self, course_id: i64, batch_id: i64) -> Result<bool>;
    // 课程挂接的批次列表
    async fn list_batch_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>>;
    // 批次挂接的课程列表
    async fn list_course_ids_of_batch(&self, batch_id: i64) -> Result<Vec<i64>>;
    // 把批次从所有课程摘除（批次级联）
    async fn detach_batch_from_all_courses(&self, batch_id: i64) -> Result<u64>;
    // 课程批次关系全部清空（课程级联）
    async fn clear_course_batches(&self, course_id: i64) -> Result<u64>;
    // 教师加入课程
    async fn add_faculty_to_course(&self, course_id: i64, faculty_id: i64) -> Result<bool>;
    // 教师退出课程
    async fn remove_faculty_from_course(&self, course_id: i64, faculty_id: i64) -> Result<bool>;
    // 课程教师列表
    async fn list_faculty_ids_of_course(&self, course_id: i64) -> Result<Vec<i64>>;
    // 课程从所有教师的课程列表中移除（课程级联）
    async fn clear_course_faculty(&self, course_id: i64) -> Result<u64>;

    /// 成绩占位方法
    // 无序批量补齐占位行；重复键逐项忽略，返回实际插入数
    async fn insert_missing_grades(
        &self,
        task_id: i64,
        course_id: i64,
        student_ids: &[i64],
    ) -> Result<u64>;
    // 删除指定 (task, students) 的占位行
    async fn delete_grades_for_students(&self, task_id: i64, student_ids: &[i64]) -> Result<u64>;
    // 按任务删除成绩
    async fn delete_grades_by_task(&self, task_id: i64) -> Result<u64>;
    // 按学生删除成绩
    async fn delete_grades_by_student(&self, student_id: i64) -> Result<u64>;
    // 按课程删除成绩（冗余 course_id 列直接命中）
    async fn delete_grades_by_course(&self, course_id: i64) -> Result<u64>;
    // 通过ID获取成绩
    async fn get_grade_by_id(&self, grade_id: i64) -> Result<Option<Grade>>;
    // 通过 (task, student) 获取成绩
    async fn get_grade_by_task_and_student(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Grade>>;
    // 列出成绩
    async fn list_grades_with_pagination(&self, query: GradeListQuery)
    -> Result<GradeListResponse>;
    // 任务下已有占位行的学生集合（对账用）
    async fn list_graded_student_ids(&self, task_id: i64) -> Result<Vec<i64>>;
    // 应用单条评分；grade 为 None 回退 Pending 并清空评分信息
    async fn apply_grade_update(
        &self,
        grade_id: i64,
        grade: Option<f64>,
        feedback: Option<String>,
        grader: ActorRef,
    ) -> Result<Option<Grade>>;
    // 把提交挂到对应 (task, student) 的成绩行上
    async fn link_submission(
        &self,
        task_id: i64,
        student_id: i64,
        submission_id: Option<i64>,
    ) -> Result<bool>;

    /// 提交管理方法
    // 创建提交；(task, student) 已存在时返回 DuplicateKey 错误
    async fn create_submission(
        &self,
        task_id: i64,
        student_id: i64,
        content: String,
        attachments: &[String],
        lateness: Lateness,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 通过 (task, student) 获取提交
    async fn get_submission_by_task_and_student(
        &self,
        task_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 替换提交内容与附件
    async fn update_submission_content(
        &self,
        submission_id: i64,
        content: String,
        attachments: &[String],
    ) -> Result<Option<Submission>>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 按任务删除提交
    async fn delete_submissions_by_task(&self, task_id: i64) -> Result<u64>;
    // 按学生删除提交
    async fn delete_submissions_by_student(&self, student_id: i64) -> Result<u64>;
    // 删除指定 (task, students) 的提交
    async fn delete_submissions_for_students(
        &self,
        task_id: i64,
        student_ids: &[i64],
    ) -> Result<u64>;
    // 任务下已提交的学生集合（孤儿提交清扫用）
    async fn list_submitted_student_ids(&self, task_id: i64) -> Result<Vec<i64>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
