//! Argument resolution.
//!
//! Three sources can feed a node: its bound slots, the values supplied when
//! the chain is invoked (first node only), and the upstream value (every later
//! node). Bound values always win. The rules are:
//!
//! | node state      | first node                      | later node                  |
//! |-----------------|---------------------------------|-----------------------------|
//! | unbound         | call arguments verbatim         | `(upstream)`                |
//! | constant        | bound values                    | bound values                |
//! | one hole        | holes filled from call args     | hole replaced by upstream   |
//! | several holes   | holes filled from call args     | error                       |

use serde_json::Value;

use crate::args::{Args, Bindings, Slot};
use crate::node::{BindState, Node};
use crate::signature::Signature;

/// Fill the holes in `bound` from `supplied`.
///
/// Positional holes take supplied positional values left to right. Keyword
/// holes take the supplied keyword of the same name, else the next unused
/// positional value (keyword holes are visited in name order). A positional
/// hole still open after that takes the supplied keyword naming its parameter
/// in `signature`. Leftover positional values are appended; leftover keywords
/// are added unless the name is already bound. Holes with nothing to fill them
/// stay holes.
pub fn fill_holes(signature: &Signature, bound: &Bindings, supplied: Bindings) -> Bindings {
  let mut positional_supply = supplied.positional.into_iter();
  let mut keyword_supply = supplied.keyword;

  let mut positional: Vec<Slot> = bound
    .positional
    .iter()
    .map(|slot| match slot {
      Slot::Hole => positional_supply.next().unwrap_or(Slot::Hole),
      fixed => fixed.clone(),
    })
    .collect();

  let mut names: Vec<&String> = bound.keyword.keys().collect();
  names.sort();

  let mut keyword = bound.keyword.clone();
  for name in names {
    let supplied_value = keyword_supply.remove(name);
    match keyword.get_mut(name) {
      Some(slot) if slot.is_hole() => {
        *slot = supplied_value
          .or_else(|| positional_supply.next())
          .unwrap_or(Slot::Hole);
      }
      _ => {}
    }
  }

  // Bound keywords claim their parameters, so positions map onto the rest.
  let positional_params = signature
    .params
    .iter()
    .filter(|param| !bound.keyword.contains_key(&param.name));
  for (slot, param) in positional.iter_mut().zip(positional_params) {
    if slot.is_hole() {
      if let Some(value) = keyword_supply.remove(&param.name) {
        *slot = value;
      }
    }
  }

  positional.extend(positional_supply);
  keyword.extend(keyword_supply);

  Bindings {
    positional,
    keyword,
  }
}

/// Replace the single hole in `bound` with `value`.
fn substitute(bound: &Bindings, value: Value) -> Args {
  let mut value = Some(value);
  let mut take = |slot: &Slot| match slot {
    Slot::Fixed(v) => v.clone(),
    Slot::Hole => value.take().unwrap_or(Value::Null),
  };

  let positional = bound.positional.iter().map(&mut take).collect();
  let keyword = bound
    .keyword
    .iter()
    .map(|(name, slot)| (name.clone(), take(slot)))
    .collect();

  Args {
    positional,
    keyword,
  }
}

/// Compute the final call arguments for `node`.
///
/// `upstream` is `None` only for the first node of a chain; `extras` are the
/// call arguments and are only consulted for the first node.
pub fn resolve(node: &Node, upstream: Option<Value>, extras: Args) -> Result<Args, String> {
  let bound = node.bindings();

  match (node.state(), upstream) {
    (BindState::Unbound, None) => Ok(extras),
    (BindState::Unbound, Some(value)) => Ok(Args::from(value)),
    (BindState::Constant, _) => bound
      .to_args()
      .ok_or_else(|| "constant node holds a placeholder".to_string()),
    (BindState::Partial(_), None) => fill_holes(node.signature(), bound, extras.into())
      .to_args()
      .ok_or_else(|| {
        format!(
          "not enough call arguments to fill {} placeholder(s)",
          bound.hole_count()
        )
      }),
    (BindState::Partial(1), Some(value)) => Ok(substitute(bound, value)),
    (BindState::Partial(holes), Some(_)) => Err(format!(
      "{} placeholders cannot all take the single upstream value",
      holes
    )),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::node::Callable;
  use serde_json::json;

  fn mul() -> Signature {
    Signature::of("mul", ["x", "y"])
  }

  fn node(bindings: Bindings) -> Node {
    let callable = Callable::new(mul(), |_| Ok(Value::Null));
    Node::new(Arc::new(callable)).with_bindings(bindings)
  }

  #[test]
  fn test_unbound_first_takes_extras() {
    let extras = Args::new().kwarg("x", 1).kwarg("y", 2);
    let args = resolve(&node(Bindings::new()), None, extras.clone()).unwrap();
    assert_eq!(args, extras);
  }

  #[test]
  fn test_unbound_later_takes_upstream() {
    let args = resolve(&node(Bindings::new()), Some(json!(3)), Args::new()).unwrap();
    assert_eq!(args, Args::positional([3]));
  }

  #[test]
  fn test_constant_ignores_everything() {
    let bound = Bindings::new().arg(1).arg(2);
    let args = resolve(&node(bound.clone()), None, Args::positional([10, 6])).unwrap();
    assert_eq!(args, Args::positional([1, 2]));

    let args = resolve(&node(bound), Some(json!(3)), Args::new()).unwrap();
    assert_eq!(args, Args::positional([1, 2]));
  }

  #[test]
  fn test_first_node_fills_holes_in_order() {
    let bound = Bindings::new().hole().arg(5).hole();
    let args = resolve(&node(bound), None, Args::positional([1, 2])).unwrap();
    assert_eq!(args, Args::positional([1, 5, 2]));
  }

  #[test]
  fn test_first_node_keyword_hole() {
    let bound = Bindings::new().arg(1).kwarg_hole("y");
    let args = resolve(&node(bound.clone()), None, Args::new().kwarg("y", 4)).unwrap();
    assert_eq!(args, Args::new().arg(1).kwarg("y", 4));

    let args = resolve(&node(bound), None, Args::positional([7])).unwrap();
    assert_eq!(args, Args::new().arg(1).kwarg("y", 7));
  }

  #[test]
  fn test_first_node_positional_hole_takes_keyword() {
    let bound = Bindings::new().hole().arg(3);
    let args = resolve(&node(bound), None, Args::new().kwarg("x", 2)).unwrap();
    assert_eq!(args, Args::positional([2, 3]));

    let bound = Bindings::new().hole().hole();
    let args = resolve(&node(bound), None, Args::new().arg(1).kwarg("y", 2)).unwrap();
    assert_eq!(args, Args::positional([1, 2]));
  }

  #[test]
  fn test_fill_holes_skips_keyword_bound_parameters() {
    // `x` is bound by keyword, so the positional hole stands for `y`.
    let bound = Bindings::new().hole().kwarg("x", 5);
    let filled = fill_holes(&mul(), &bound, Bindings::new().kwarg("y", 7));
    assert_eq!(filled, Bindings::new().arg(7).kwarg("x", 5));

    let filled = fill_holes(&mul(), &bound, Bindings::new().kwarg("x", 9));
    assert_eq!(filled, Bindings::new().hole().kwarg("x", 5));
  }

  #[test]
  fn test_first_node_unfilled_hole() {
    let bound = Bindings::new().hole().hole();
    let err = resolve(&node(bound), None, Args::positional([1])).unwrap_err();
    assert!(err.contains("placeholder"));
  }

  #[test]
  fn test_later_node_hole_takes_upstream() {
    let args = resolve(&node(Bindings::new().arg(3).hole()), Some(json!(9)), Args::new()).unwrap();
    assert_eq!(args, Args::positional([3, 9]));

    let args = resolve(&node(Bindings::new().kwarg_hole("x")), Some(json!(2)), Args::new()).unwrap();
    assert_eq!(args, Args::new().kwarg("x", 2));
  }

  #[test]
  fn test_later_node_rejects_two_holes() {
    let bound = Bindings::new().hole().hole();
    assert!(resolve(&node(bound), Some(json!(1)), Args::new()).is_err());
  }

  #[test]
  fn test_fill_holes_bound_keyword_wins() {
    let bound = Bindings::new().hole().kwarg("y", 1);
    let filled = fill_holes(&mul(), &bound, Bindings::new().arg(2).arg(8).kwarg("y", 9));
    assert_eq!(filled, Bindings::new().arg(2).arg(8).kwarg("y", 1));
  }

  #[test]
  fn test_fill_holes_partial_supply_keeps_holes() {
    let bound = Bindings::new().hole().hole();
    let filled = fill_holes(&mul(), &bound, Bindings::new().arg(1));
    assert_eq!(filled, Bindings::new().arg(1).hole());
  }
}
