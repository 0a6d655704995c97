use crate::LqRes;
use crate::err::LqErr;

/// 单次、只进的游标。
///
/// `advance`返回`false`后，之后的每次调用都必须继续返回`false`。
/// `current`仅在`advance`返回`true`之后有意义，误用时立即失败而不是返回旧数据。
/// 不支持重置，重新遍历需要从[`Sequence`]重新获取游标。
pub trait Enumerator {
    type Item;

    /// 移动到下一个元素，存在元素时返回`true`。
    fn advance(&mut self) -> bool;

    /// 当前元素，尚未`advance`或已经结束时返回错误。
    fn try_current(&self) -> LqRes<&Self::Item>;

    /// 当前元素，尚未`advance`或已经结束时panic。
    fn current(&self) -> &Self::Item {
        match self.try_current() {
            Ok(item) => item,
            Err(err) => err.fail(),
        }
    }
}

pub type BoxEnumerator<T> = Box<dyn Enumerator<Item = T>>;

/// 可以产生[`Enumerator`]的数据源。
///
/// 每次调用`enumerator`都必须返回相互独立的新游标，多次遍历互不影响。
pub trait Sequence {
    type Item;

    fn enumerator(&self) -> BoxEnumerator<Self::Item>;
}

/// 游标所处的阶段
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub(crate) enum Cursor {
    #[default]
    Fresh,
    Active,
    Done,
}

impl Cursor {
    pub(crate) fn check(self) -> LqRes<()> {
        match self {
            Cursor::Fresh => Err(LqErr::NotStarted),
            Cursor::Active => Ok(()),
            Cursor::Done => Err(LqErr::Exhausted),
        }
    }

    pub(crate) fn is_done(self) -> bool {
        self == Cursor::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_check() {
        assert_eq!(Cursor::default().check(), Err(LqErr::NotStarted));
        assert_eq!(Cursor::Active.check(), Ok(()));
        assert_eq!(Cursor::Done.check(), Err(LqErr::Exhausted));
        assert!(Cursor::Done.is_done());
        assert!(!Cursor::Fresh.is_done());
    }
}
