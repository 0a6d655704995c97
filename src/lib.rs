//! 惰性、可组合的序列查询。
//!
//! 所有算子都只构建流水线，不做任何计算；直到终端操作（如[`Linq::to_vec`]）
//! 反复调用[`Enumerator::advance`]和[`Enumerator::current`]时才逐个拉取元素。
//!
//! ```
//! use rlinq::linq;
//!
//! let evens = linq(vec![1, 2, 3, 4, 5, 6]).filter(|x| x % 2 == 0).map(|x| x * 10);
//! assert_eq!(evens.to_vec(), vec![20, 40, 60]);
//! ```

mod enumerator;
mod err;
mod flat;
mod generate;
mod input;
mod linq;
mod op;
mod output;

pub use crate::enumerator::{BoxEnumerator, Enumerator, Sequence};
pub use crate::err::LqErr;
pub use crate::flat::Flat;
pub use crate::linq::{Iter, Linq};

pub type LqRes<T> = Result<T, LqErr>;

/// 构造流水线的入口，接受`Vec`、数组、切片、`Rc<[T]>`或已有的[`Linq`]。
///
/// 单个值使用[`Linq::of`]，可能缺失的数据源使用[`Linq::maybe`]。
pub fn linq<T: 'static>(source: impl Into<Linq<T>>) -> Linq<T> {
    source.into()
}
