//! 高亮定时器
//!
//! 定时器是独立的 tokio 任务，到点后向阅读会话的 inbox 投递输入。
//! 句柄被 drop 时任务随之中止，因此替换/清空会话即清除所有挂起的定时器。

use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::reader::ReaderInput;
use crate::application::ports::SessionId;

#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// 重复定时器：每个周期投递一次 `Tick(session)`
    ///
    /// 只持有 inbox 的弱引用，阅读会话关闭后自动退出
    pub(crate) fn ticker(
        session: SessionId,
        period: Duration,
        inbox: WeakUnboundedSender<ReaderInput>,
    ) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(tx) = inbox.upgrade() else {
                    break;
                };
                if tx.send(ReaderInput::Tick(session)).is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    /// 单次定时器：`delay` 后投递 `FallbackElapsed(session)`
    pub(crate) fn fallback(
        session: SessionId,
        delay: Duration,
        inbox: WeakUnboundedSender<ReaderInput>,
    ) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = inbox.upgrade() {
                let _ = tx.send(ReaderInput::FallbackElapsed(session));
            }
        });
        Self { task }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
