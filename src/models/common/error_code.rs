/// API 业务错误码，随 `ApiResponse.code` 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1999
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与会话 2000-2999
    Unauthorized = 2000,
    AuthFailed = 2001,
    Forbidden = 2003,
    SessionExpired = 2004,
    ResetTokenInvalid = 2005,

    // 学生与教师 3000-3999
    StudentNotFound = 3000,
    TeacherNotFound = 3001,
    TeacherAlreadyExists = 3002,

    // 成绩与结果 4000-4999
    SubjectNotFound = 4000,
    TermNotFound = 4001,

    // 入学申请 5000-5999
    ApplicationNotFound = 5000,
    ApplicationNotApproved = 5001,
    AlreadyRegistered = 5002,
    EmailAlreadyRegistered = 5003,
    NotificationFailed = 5004,

    // 班级与科目 6000-6999
    ClassNotFound = 6000,

    // 网站内容 7000-7999
    ContentNotFound = 7000,
}
