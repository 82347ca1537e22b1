//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{Json, Router, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::services::session::TurnStatus;

// ===== Simple Metrics (using atomics for zero-dep implementation) =====

/// 简单应用指标
#[derive(Default)]
pub struct AppMetrics {
    pub sessions_started_total: AtomicU64,
    pub form_rejections_total: AtomicU64,
    pub messages_total: AtomicU64,
    pub greetings_total: AtomicU64,
    pub sessions_ended_total: AtomicU64,
    pub lookup_errors_total: AtomicU64,
    pub sessions_expired_total: AtomicU64,
}

/// 指标快照
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sessions_started: u64,
    pub form_rejections: u64,
    pub messages: u64,
    pub greetings: u64,
    pub sessions_ended: u64,
    pub lookup_errors: u64,
    pub sessions_expired: u64,
}

impl AppMetrics {
    /// 记录新会话
    pub fn record_session_started(&self) {
        self.sessions_started_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录表单被拒
    pub fn record_form_rejection(&self) {
        self.form_rejections_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录一轮对话
    pub fn record_message(&self, status: TurnStatus) {
        self.messages_total.fetch_add(1, Ordering::SeqCst);
        let counter = match status {
            TurnStatus::Answered => return,
            TurnStatus::Greeted => &self.greetings_total,
            TurnStatus::Ended => &self.sessions_ended_total,
            TurnStatus::Failed => &self.lookup_errors_total,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录因空闲被回收的会话
    pub fn record_sessions_expired(&self, count: u64) {
        self.sessions_expired_total.fetch_add(count, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_started: self.sessions_started_total.load(Ordering::SeqCst),
            form_rejections: self.form_rejections_total.load(Ordering::SeqCst),
            messages: self.messages_total.load(Ordering::SeqCst),
            greetings: self.greetings_total.load(Ordering::SeqCst),
            sessions_ended: self.sessions_ended_total.load(Ordering::SeqCst),
            lookup_errors: self.lookup_errors_total.load(Ordering::SeqCst),
            sessions_expired: self.sessions_expired_total.load(Ordering::SeqCst),
        }
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP sessions_started_total Chat sessions that passed the student form
# TYPE sessions_started_total counter
sessions_started_total {}
# HELP form_rejections_total Student form submissions rejected
# TYPE form_rejections_total counter
form_rejections_total {}
# HELP messages_total Chat messages handled
# TYPE messages_total counter
messages_total {}
# HELP greetings_total Messages answered by the greeting shortcut
# TYPE greetings_total counter
greetings_total {}
# HELP sessions_ended_total Sessions ended by the user saying bye
# TYPE sessions_ended_total counter
sessions_ended_total {}
# HELP lookup_errors_total Similarity lookups that failed
# TYPE lookup_errors_total counter
lookup_errors_total {}
# HELP sessions_expired_total Sessions evicted after the idle timeout
# TYPE sessions_expired_total counter
sessions_expired_total {}
"#,
            s.sessions_started,
            s.form_rejections,
            s.messages,
            s.greetings,
            s.sessions_ended,
            s.lookup_errors,
            s.sessions_expired,
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
}

/// 健康检查结果
#[derive(Clone)]
pub struct HealthCheckResult {
    pub name: String,
    pub healthy: bool,
    pub message: String,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub health_checks: Arc<Mutex<Vec<HealthCheckResult>>>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            health_checks: Arc::new(Mutex::new(Vec::new())),
            start_time: Utc::now(),
            version,
        }
    }

    /// 添加健康检查结果
    pub async fn add_health_check(&self, result: HealthCheckResult) {
        let mut checks = self.health_checks.lock().await;
        checks.retain(|c| c.name != result.name);
        checks.push(result);
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(
    state: axum::extract::State<Arc<ObservabilityState>>,
) -> impl IntoResponse {
    let checks = state.health_checks.lock().await;
    let all_healthy = checks.iter().all(|c| c.healthy);

    let health_status = HealthStatus {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks: checks
            .iter()
            .map(|c| HealthCheck {
                name: c.name.clone(),
                status: if c.healthy {
                    "healthy".to_string()
                } else {
                    "unhealthy".to_string()
                },
                message: Some(c.message.clone()),
            })
            .collect(),
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(state: axum::extract::State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志，RUST_LOG 优先于配置的级别
pub fn init_tracing(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_session_started();
        metrics.record_message(TurnStatus::Answered);
        metrics.record_message(TurnStatus::Greeted);
        metrics.record_message(TurnStatus::Failed);
        metrics.record_form_rejection();
        metrics.record_sessions_expired(2);

        let output = metrics.gather();
        assert!(output.contains("sessions_started_total 1"));
        assert!(output.contains("messages_total 3"));
        assert!(output.contains("greetings_total 1"));
        assert!(output.contains("lookup_errors_total 1"));
        assert!(output.contains("form_rejections_total 1"));
        assert!(output.contains("sessions_ended_total 0"));
        assert!(output.contains("sessions_expired_total 2"));
    }

    #[tokio::test]
    async fn test_health_reports_unhealthy_check() {
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".into(),
            Arc::new(AppMetrics::default()),
        ));
        state
            .add_health_check(HealthCheckResult {
                name: "corpus".into(),
                healthy: false,
                message: "not loaded".into(),
            })
            .await;

        let response = create_observability_router(state.clone())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .add_health_check(HealthCheckResult {
                name: "corpus".into(),
                healthy: true,
                message: "42 patterns".into(),
            })
            .await;
        assert_eq!(state.health_checks.lock().await.len(), 1);

        let response = create_observability_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
