use crate::LqRes;
use crate::enumerator::{BoxEnumerator, Cursor, Enumerator, Sequence};
use crate::err::LqErr;
use crate::linq::Linq;
use std::rc::Rc;

type Combine<T, S, R> = Rc<dyn Fn(&T, &S) -> R>;

impl<T: 'static> Linq<T> {
    /// 同步遍历两个序列并合并对应位置的元素，任意一侧结束时结束。
    pub fn zip<S: 'static, R: 'static>(&self, other: &Linq<S>, combine: impl Fn(&T, &S) -> R + 'static) -> Linq<R> {
        Linq::new(Zip { left: self.clone(), right: other.clone(), combine: Rc::new(combine) })
    }
}

struct Zip<T, S, R> {
    left: Linq<T>,
    right: Linq<S>,
    combine: Combine<T, S, R>,
}

impl<T: 'static, S: 'static, R: 'static> Sequence for Zip<T, S, R> {
    type Item = R;

    fn enumerator(&self) -> BoxEnumerator<R> {
        Box::new(ZipEnumerator {
            left: self.left.enumerator(),
            right: self.right.enumerator(),
            combine: Rc::clone(&self.combine),
            item: None,
            cursor: Cursor::Fresh,
        })
    }
}

struct ZipEnumerator<T, S, R> {
    left: BoxEnumerator<T>,
    right: BoxEnumerator<S>,
    combine: Combine<T, S, R>,
    item: Option<R>,
    cursor: Cursor,
}

impl<T, S, R> Enumerator for ZipEnumerator<T, S, R> {
    type Item = R;

    fn advance(&mut self) -> bool {
        if self.cursor.is_done() {
            return false;
        }
        // 左侧结束时不再推进右侧
        if self.left.advance() && self.right.advance() {
            self.item = Some((self.combine)(self.left.current(), self.right.current()));
            self.cursor = Cursor::Active;
            true
        } else {
            self.item = None;
            self.cursor = Cursor::Done;
            false
        }
    }

    fn try_current(&self) -> LqRes<&R> {
        self.cursor.check()?;
        self.item.as_ref().ok_or(LqErr::Exhausted)
    }
}
