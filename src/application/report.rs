//! 面向操作者的状态输出
//!
//! 工作流的进度信息写到 stdout，诊断日志走 tracing（stderr）。
//! 测试中用 [`Reporter::capture`] 收集输出

use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Reporter {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Reporter {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// 创建写入内存缓冲区的 Reporter
    pub fn capture() -> (Self, CapturedOutput) {
        let output = CapturedOutput::default();
        (Self::new(output.clone()), output)
    }

    /// 输出一行。stdout 写失败时丢弃，不影响工作流
    pub fn line(&self, text: impl AsRef<str>) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", text.as_ref());
            let _ = sink.flush();
        }
    }

    pub fn separator(&self) {
        self.line("=".repeat(50));
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter").finish_non_exhaustive()
    }
}

/// 共享的内存输出缓冲区
#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut buf) => {
                buf.extend_from_slice(data);
                Ok(data.len())
            }
            Err(_) => Err(std::io::Error::other("output buffer poisoned")),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
