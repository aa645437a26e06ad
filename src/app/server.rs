// ==========================================
// 机场运行状态引擎 - 行协议服务循环
// ==========================================
// 职责: 逐行读取命令并逐行写回响应
// 约束: 坏输入行（非 UTF-8 / 非法 JSON）只产生错误响应，不终止循环
// ==========================================

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::api::ApiError;
use crate::app::commands::{error_line, handle_command};
use crate::app::state::AppState;

/// 处理输入直到 EOF
///
/// # 返回
/// - Ok(()): 输入结束
/// - Err(io::Error): 读写底层流失败
pub async fn serve<R, W>(state: &AppState, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut line_no: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        line_no += 1;

        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handle_command(state, line).await,
            Err(e) => {
                tracing::warn!(line_no, "命令行不是有效的 UTF-8: {}", e);
                error_line(ApiError::InvalidInput(format!(
                    "第 {} 行不是有效的 UTF-8: {}",
                    line_no, e
                )))
            }
        };

        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}
