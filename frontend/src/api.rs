use gloo_net::http::{Request, RequestBuilder, Response};
use std::fmt;

use fixmycity_shared::protocol::{
    ApiRequest, CreateCommentRequest, DeleteReportRequest, HttpMethod, ListReportsRequest,
    LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RegisterRequest,
    UpdateReportStatusRequest,
};
use fixmycity_shared::{Comment, Report, ReportStatus};

/// 后端基址：编译期注入，未设置时使用本地开发默认值
const DEFAULT_API_URL: &str = "http://localhost:3000";

fn api_base_url() -> String {
    option_env!("FIXMYCITY_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

// =========================================================
// 错误类型
// =========================================================

/// API 客户端错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络不可达或请求构建失败
    Network(String),
    /// 服务端以非 2xx 响应；message 取自响应体的 `{message}`
    Server { status: u16, message: String },
    /// 响应体解析失败
    Decode(String),
}

impl ApiError {
    /// HTTP 状态码（仅服务端错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 会话是否已失效（401/403），调用方据此清除本地会话
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Connection failed: {}", msg),
            ApiError::Server { message, .. } => write!(f, "{}", message),
            ApiError::Decode(msg) => write!(f, "Invalid server response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// =========================================================
// 客户端
// =========================================================

/// 报告提交草稿（multipart 表单）
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub user_id: u64,
    pub image: Option<web_sys::File>,
}

/// FixMyCity 后端客户端
///
/// 基址在构建时读取一次；令牌存在时所有需要认证的端点
/// 自动携带 Bearer 头。
#[derive(Clone, Debug, PartialEq)]
pub struct FixMyCityApi {
    base_url: String,
    token: Option<String>,
}

impl FixMyCityApi {
    /// 匿名客户端（登录、注册页使用）
    pub fn new() -> Self {
        Self {
            base_url: api_base_url(),
            token: None,
        }
    }

    /// 认证客户端（登录成功后由会话管理器持有）
    pub fn with_token(token: String) -> Self {
        Self {
            base_url: api_base_url(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn builder(&self, method: HttpMethod, url: &str, authenticated: bool) -> RequestBuilder {
        let builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        };
        match (&self.token, authenticated) {
            (Some(token), true) => builder.header("Authorization", &format!("Bearer {}", token)),
            // 没有令牌时照常发送，由服务端以 401 拒绝
            _ => builder,
        }
    }

    /// 非 2xx 响应翻译为带服务端消息的错误
    async fn reject(response: Response) -> ApiError {
        let status = response.status();
        let message = response
            .json::<MessageResponse>()
            .await
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Server { status, message }
    }

    /// 发送一个类型化的 JSON 端点请求
    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let builder = self.builder(R::METHOD, &url, R::AUTHENTICATED);

        let response = if matches!(R::METHOD, HttpMethod::Get) {
            builder.send().await
        } else {
            builder
                .header("Content-Type", "application/json")
                .json(request)
                .map_err(|e| ApiError::Network(e.to_string()))?
                .send()
                .await
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::reject(response).await);
        }

        response
            .json::<R::Response>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// 邮箱密码登录，成功返回令牌和用户记录
    pub async fn login(&self, email: String, password: String) -> Result<LoginResponse, ApiError> {
        self.send(&LoginRequest { email, password }).await
    }

    /// 注册新账号
    pub async fn register(&self, request: RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.send(&request).await
    }

    /// 通知服务端会话结束（尽力而为，响应体被忽略）
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send(&LogoutRequest).await.map(|_| ())
    }

    /// 获取报告列表
    pub async fn reports(&self) -> Result<Vec<Report>, ApiError> {
        self.send(&ListReportsRequest).await
    }

    /// 更新报告状态（`PUT /report/{id}`）
    ///
    /// 调用方只在本方法成功返回后才修改本地列表。
    pub async fn update_status(&self, id: u64, status: ReportStatus) -> Result<(), ApiError> {
        self.send(&UpdateReportStatusRequest { id, status })
            .await
            .map(|_| ())
    }

    /// 删除报告
    pub async fn delete_report(&self, id: u64) -> Result<(), ApiError> {
        self.send(&DeleteReportRequest { id }).await.map(|_| ())
    }

    /// 发表评论，返回服务端创建的评论记录
    pub async fn add_comment(&self, report_id: u64, text: String) -> Result<Comment, ApiError> {
        self.send(&CreateCommentRequest { report_id, text }).await
    }

    /// 提交报告（multipart，含可选图片）
    ///
    /// 新报告总是以 `PENDING` 状态创建。Content-Type 交给浏览器
    /// 设置以携带 multipart 边界。
    pub async fn submit_report(&self, draft: ReportDraft) -> Result<MessageResponse, ApiError> {
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Network(format!("form init failed: {:?}", e)))?;

        let fields = [
            ("title", draft.title.trim()),
            ("description", draft.description.trim()),
            ("location", draft.location.trim()),
            ("status", ReportStatus::Pending.as_wire()),
        ];
        for (name, value) in fields {
            form.append_with_str(name, value)
                .map_err(|e| ApiError::Network(format!("form field failed: {:?}", e)))?;
        }
        form.append_with_str("userId", &draft.user_id.to_string())
            .map_err(|e| ApiError::Network(format!("form field failed: {:?}", e)))?;
        if let Some(file) = &draft.image {
            form.append_with_blob_and_filename("image", file, &file.name())
                .map_err(|e| ApiError::Network(format!("form file failed: {:?}", e)))?;
        }

        let builder = self.builder(HttpMethod::Post, &self.url("/report"), true);
        let response = builder
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(Self::reject(response).await);
        }

        response
            .json::<MessageResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl Default for FixMyCityApi {
    fn default() -> Self {
        Self::new()
    }
}
