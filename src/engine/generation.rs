//! 运行代际与互斥
//!
//! 每次开始运行都领取一张新代际的票据；重置会让代际前进并释放运行槽位。
//! 持有旧票据的运行在下一个挂起点发现自己已过期，随即静默结束。

use crate::algorithm::AlgorithmKind;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct RunState {
    generation: u64,
    active: Option<(u64, AlgorithmKind)>,
}

/// 运行槽位守卫
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    state: Arc<Mutex<RunState>>,
}

impl RunGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 占用运行槽位并领取新票据；已有运行时拒绝
    pub fn begin(&self, kind: AlgorithmKind) -> Result<RunTicket> {
        let mut state = self.state.lock();
        if let Some((_, active)) = state.active {
            return Err(Error::RunInProgress(active.to_string()));
        }
        state.generation += 1;
        state.active = Some((state.generation, kind));

        Ok(RunTicket {
            generation: state.generation,
            kind,
            state: Arc::clone(&self.state),
        })
    }

    /// 让所有已发出的票据过期，并释放槽位
    pub fn invalidate(&self) -> u64 {
        let mut state = self.state.lock();
        state.generation += 1;
        state.active = None;
        state.generation
    }

    /// 当前代际
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// 正在运行的算法
    pub fn active(&self) -> Option<AlgorithmKind> {
        self.state.lock().active.map(|(_, kind)| kind)
    }
}

/// 运行票据，释放时归还槽位
#[derive(Debug)]
pub struct RunTicket {
    generation: u64,
    kind: AlgorithmKind,
    state: Arc<Mutex<RunState>>,
}

impl RunTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// 票据是否仍属于当前代际
    pub fn is_current(&self) -> bool {
        self.state.lock().generation == self.generation
    }
}

impl Drop for RunTicket {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if matches!(state.active, Some((generation, _)) if generation == self.generation) {
            state.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_run_rejected() {
        let guard = RunGuard::new();
        let ticket = guard.begin(AlgorithmKind::Prim).unwrap();
        assert_eq!(guard.active(), Some(AlgorithmKind::Prim));

        let err = guard.begin(AlgorithmKind::Kruskal).unwrap_err();
        assert!(matches!(err, Error::RunInProgress(_)));

        drop(ticket);
        assert_eq!(guard.active(), None);
        assert!(guard.begin(AlgorithmKind::Kruskal).is_ok());
    }

    #[test]
    fn test_invalidate_expires_ticket_and_frees_slot() {
        let guard = RunGuard::new();
        let old = guard.begin(AlgorithmKind::Kruskal).unwrap();
        assert!(old.is_current());

        guard.invalidate();
        assert!(!old.is_current());
        assert_eq!(guard.active(), None);

        let new = guard.begin(AlgorithmKind::Prim).unwrap();
        assert!(new.generation() > old.generation());

        // 旧票据释放时不能影响新运行
        drop(old);
        assert_eq!(guard.active(), Some(AlgorithmKind::Prim));
        assert!(new.is_current());
    }
}
