//! API 业务错误码
//!
//! 前两位对应 HTTP 状态，后三位为业务细分。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 400xx 请求/校验错误
    BadRequest = 40000,
    ValidationFailed = 40001,
    DeadlineExceeded = 40002,

    Unauthorized = 40100,
    Forbidden = 40300,

    // 404xx 资源不存在
    NotFound = 40400,
    StudentNotFound = 40401,
    BatchNotFound = 40402,
    CourseNotFound = 40403,
    TaskNotFound = 40404,
    GradeNotFound = 40405,
    SubmissionNotFound = 40406,

    // 409xx 唯一性冲突
    Conflict = 40900,
    BatchAlreadyExists = 40901,
    CourseCodeTaken = 40902,
    StudentEmailTaken = 40903,
    LockedForGrading = 40904,

    InternalServerError = 50000,
}
