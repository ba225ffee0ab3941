//! 成员关系存储操作
//!
//! 批次↔学生、课程↔批次、课程↔教师三张关系表。
//! 文档模型中的双向引用数组各自收敛为一张关系表，加入/摘除
//! 都是单行幂等写，唯一索引保证重复加入不产生脏数据。

use super::SeaOrmStorage;
use crate::entity::batch_students::{
    ActiveModel as BatchStudentActiveModel, Column as BatchStudentColumn,
    Entity as BatchStudents,
};
use crate::entity::course_batches::{
    ActiveModel as CourseBatchActiveModel, Column as CourseBatchColumn, Entity as CourseBatches,
};
use crate::entity::course_faculty::{
    ActiveModel as CourseFacultyActiveModel, Column as CourseFacultyColumn,
    Entity as CourseFaculty,
};
use crate::errors::{Result, TaskHubError};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

impl SeaOrmStorage {
    /// 学生加入批次（幂等：已存在返回 false）
    pub async fn add_student_to_batch_impl(&self, batch_id: i64, student_id: i64) -> Result<bool> {
        let model = BatchStudentActiveModel {
            batch_id: Set(batch_id),
            student_id: Set(student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = BatchStudents::insert(model)
            .on_conflict(
                OnConflict::columns([BatchStudentColumn::BatchId, BatchStudentColumn::StudentId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("加入批次失败: {e}")))?;

        Ok(inserted > 0)
    }

    /// 学生移出批次
    pub async fn remove_student_from_batch_impl(
        &self,
        batch_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let result = BatchStudents::delete_many()
            .filter(BatchStudentColumn::BatchId.eq(batch_id))
            .filter(BatchStudentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("移出批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批次成员列表
    pub async fn list_student_ids_of_batch_impl(&self, batch_id: i64) -> Result<Vec<i64>> {
        let ids = BatchStudents::find()
            .select_only()
            .column(BatchStudentColumn::StudentId)
            .filter(BatchStudentColumn::BatchId.eq(batch_id))
            .order_by_asc(BatchStudentColumn::StudentId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次成员失败: {e}")))?;

        Ok(ids)
    }

    /// 学生所在批次列表
    pub async fn list_batch_ids_of_student_impl(&self, student_id: i64) -> Result<Vec<i64>> {
        let ids = BatchStudents::find()
            .select_only()
            .column(BatchStudentColumn::BatchId)
            .filter(BatchStudentColumn::StudentId.eq(student_id))
            .order_by_asc(BatchStudentColumn::BatchId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询学生批次失败: {e}")))?;

        Ok(ids)
    }

    /// 把学生从所有批次移除
    pub async fn remove_student_from_all_batches_impl(&self, student_id: i64) -> Result<u64> {
        let result = BatchStudents::delete_many()
            .filter(BatchStudentColumn::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清理学生批次失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 清空批次成员
    pub async fn clear_batch_students_impl(&self, batch_id: i64) -> Result<u64> {
        let result = BatchStudents::delete_many()
            .filter(BatchStudentColumn::BatchId.eq(batch_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清空批次成员失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 批次挂接到课程（幂等：已挂接返回 false）
    pub async fn attach_batch_to_course_impl(&self, course_id: i64, batch_id: i64) -> Result<bool> {
        let model = CourseBatchActiveModel {
            course_id: Set(course_id),
            batch_id: Set(batch_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = CourseBatches::insert(model)
            .on_conflict(
                OnConflict::columns([CourseBatchColumn::CourseId, CourseBatchColumn::BatchId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("挂接批次失败: {e}")))?;

        Ok(inserted > 0)
    }

    /// 批次从课程摘除
    pub async fn detach_batch_from_course_impl(
        &self,
        course_id: i64,
        batch_id: i64,
    ) -> Result<bool> {
        let result = CourseBatches::delete_many()
            .filter(CourseBatchColumn::CourseId.eq(course_id))
            .filter(CourseBatchColumn::BatchId.eq(batch_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("摘除批次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程挂接的批次列表
    pub async fn list_batch_ids_of_course_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids = CourseBatches::find()
            .select_only()
            .column(CourseBatchColumn::BatchId)
            .filter(CourseBatchColumn::CourseId.eq(course_id))
            .order_by_asc(CourseBatchColumn::BatchId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询课程批次失败: {e}")))?;

        Ok(ids)
    }

    /// 批次挂接的课程列表
    pub async fn list_course_ids_of_batch_impl(&self, batch_id: i64) -> Result<Vec<i64>> {
        let ids = CourseBatches::find()
            .select_only()
            .column(CourseBatchColumn::CourseId)
            .filter(CourseBatchColumn::BatchId.eq(batch_id))
            .order_by_asc(CourseBatchColumn::CourseId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询批次课程失败: {e}")))?;

        Ok(ids)
    }

    /// 把批次从所有课程摘除
    pub async fn detach_batch_from_all_courses_impl(&self, batch_id: i64) -> Result<u64> {
        let result = CourseBatches::delete_many()
            .filter(CourseBatchColumn::BatchId.eq(batch_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清理批次课程失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 清空课程批次关系
    pub async fn clear_course_batches_impl(&self, course_id: i64) -> Result<u64> {
        let result = CourseBatches::delete_many()
            .filter(CourseBatchColumn::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清空课程批次失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 教师加入课程（幂等：已存在返回 false）
    pub async fn add_faculty_to_course_impl(&self, course_id: i64, faculty_id: i64) -> Result<bool> {
        let model = CourseFacultyActiveModel {
            course_id: Set(course_id),
            faculty_id: Set(faculty_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let inserted = CourseFaculty::insert(model)
            .on_conflict(
                OnConflict::columns([
                    CourseFacultyColumn::CourseId,
                    CourseFacultyColumn::FacultyId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("加入课程教师失败: {e}")))?;

        Ok(inserted > 0)
    }

    /// 教师退出课程
    pub async fn remove_faculty_from_course_impl(
        &self,
        course_id: i64,
        faculty_id: i64,
    ) -> Result<bool> {
        let result = CourseFaculty::delete_many()
            .filter(CourseFacultyColumn::CourseId.eq(course_id))
            .filter(CourseFacultyColumn::FacultyId.eq(faculty_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("移除课程教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 课程教师列表
    pub async fn list_faculty_ids_of_course_impl(&self, course_id: i64) -> Result<Vec<i64>> {
        let ids = CourseFaculty::find()
            .select_only()
            .column(CourseFacultyColumn::FacultyId)
            .filter(CourseFacultyColumn::CourseId.eq(course_id))
            .order_by_asc(CourseFacultyColumn::FacultyId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("查询课程教师失败: {e}")))?;

        Ok(ids)
    }

    /// 清空课程教师关系
    pub async fn clear_course_faculty_impl(&self, course_id: i64) -> Result<u64> {
        let result = CourseFaculty::delete_many()
            .filter(CourseFacultyColumn::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TaskHubError::database_operation(format!("清空课程教师失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
