use tracing_subscriber::EnvFilter;

/// 初始化全局tracing订阅者
///
/// `RUST_LOG` 存在时优先于配置的 `level`。`json` 为true时输出JSON格式日志。
pub fn init(level: &str, json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

