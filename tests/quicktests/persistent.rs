use persistent_bst::{Node, Tree};
use quickcheck_macros::quickcheck;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::Op;

type Entry = (i8, i8);

fn by_key(a: &Entry, b: &Entry) -> Ordering {
    a.0.cmp(&b.0)
}

/// Applies a set of operations to a tree and a map.
/// This way we can ensure that after a random smattering of inserts,
/// updates and removes we have the same entries in both.
fn do_ops(ops: &[Op<i8, i8>], mut bst: Tree<Entry>, map: &mut BTreeMap<i8, i8>) -> Tree<Entry> {
    for op in ops {
        match *op {
            Op::Insert(k, v) => {
                bst = bst.insert((k, v));
                map.insert(k, v);
            }
            Op::Remove(k) => {
                bst = bst.remove(&(k, 0));
                map.remove(&k);
            }
            Op::Update(k, v) => {
                bst = bst.update((k, 0), |_, _| v.map(|v| (k, v)));
                match (map.contains_key(&k), v) {
                    (true, Some(v)) => {
                        map.insert(k, v);
                    }
                    (true, None) => {
                        map.remove(&k);
                    }
                    (false, _) => {}
                }
            }
            Op::Iter => {
                let entries: Vec<Entry> = map.iter().map(|(k, v)| (*k, *v)).collect();
                assert_eq!(bst.to_list_with(|e| *e), entries);
            }
        }
    }

    bst
}

/// Checks the ordering invariant below `node`, returning the subtree's height.
fn checked_height<T: Ord>(node: Option<&Node<T>>, low: Option<&T>, high: Option<&T>) -> isize {
    match node {
        None => -1,
        Some(n) => {
            assert!(low.map_or(true, |low| n.element() > low));
            assert!(high.map_or(true, |high| n.element() < high));
            let left = checked_height(n.left(), low, Some(n.element()));
            let right = checked_height(n.right(), Some(n.element()), high);
            left.max(right) + 1
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let tree = Tree::with_comparator(by_key);
    let mut map = BTreeMap::new();

    let tree = do_ops(&ops, tree, &mut map);
    let keys: Vec<i8> = tree.to_list_with(|e| e.0);

    tree.len() == map.len()
        && keys.iter().eq(map.keys())
        && map.iter().all(|(k, v)| tree.find(&(*k, 0)) == Some(&(*k, *v)))
}

#[quickcheck]
fn invariant_and_height(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let tree = Tree::from_elements(xs);
    let tree = deletes.iter().fold(tree, |tree, x| tree.remove(x));

    checked_height(tree.root(), None, None) == tree.height()
}

#[quickcheck]
fn round_trip(xs: Vec<i8>) -> bool {
    let tree = Tree::from_elements(xs.clone());
    let expected: Vec<i8> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    tree.to_list_with(|x| *x) == expected && tree.len() == expected.len()
}

#[quickcheck]
fn later_duplicates_win(entries: Vec<Entry>) -> bool {
    let tree = Tree::from_elements_with(entries.clone(), by_key);
    let expected: BTreeMap<i8, i8> = entries.into_iter().collect();

    tree.to_list_with(|e| *e) == expected.into_iter().collect::<Vec<_>>()
}

#[quickcheck]
fn insertion_order_changes_shape_not_contents(xs: Vec<i8>) -> bool {
    let forward = Tree::from_elements(xs.clone());
    let backward = Tree::from_elements(xs.into_iter().rev());

    forward.to_list() == backward.to_list()
}

#[quickcheck]
fn removing_absent_is_identity(xs: Vec<i8>, x: i8) -> bool {
    let tree = Tree::from_elements(xs.into_iter().filter(|y| *y != x));
    let removed = tree.remove(&x);

    removed.ptr_eq(&tree) && removed.height() == tree.height() && removed.to_list() == tree.to_list()
}

#[quickcheck]
fn min_max(xs: Vec<i8>) -> bool {
    let tree = Tree::from_elements(xs.clone());
    tree.min() == xs.iter().min() && tree.max() == xs.iter().max()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let original = Tree::from_elements(xs.clone());
    let tree = deletes.iter().fold(original.clone(), |tree, x| tree.remove(x));

    let mut still_present = xs.clone();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
        // The tree we started from still has everything.
        && xs.iter().all(|x| original.find(x).is_some())
}
