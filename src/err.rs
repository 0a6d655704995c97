use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum LqErr {
    #[error("[Enumerator] `current` called before the first `advance`")]
    NotStarted,

    #[error("[Enumerator] `current` called after the sequence was exhausted")]
    Exhausted,
}

impl LqErr {
    /// 以错误信息终止当前遍历。
    ///
    /// 协议误用属于调用方的编程错误，不可恢复。
    pub(crate) fn fail(self) -> ! {
        panic!("{}", self)
    }
}
