use automerge2::{
    ActorId, AutoCommit, AutomergeError, ObjType, ROOT, ScalarValue,
    transaction::{CommitOptions, Transactable},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::LoadBenchError;

#[derive(Clone, Debug)]
pub enum DocumentShape {
    /// One map with `keys` scalar entries, committed once.
    FlatMap { keys: usize },
    /// One list with `items` string elements, committed once.
    List { items: usize },
    /// `changes` commits, each touching `ops_per_change` counters and notes.
    ChangeHistory {
        changes: usize,
        ops_per_change: usize,
    },
}

/// Builds and saves a document in the version 2 binary format.
///
/// The actor id and change timestamps derive from `seed`, so the same shape
/// and seed always produce identical bytes.
pub fn generate_document(shape: DocumentShape, seed: u64) -> Result<Vec<u8>, LoadBenchError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut doc = AutoCommit::new().with_actor(ActorId::from(seed.to_be_bytes().to_vec()));
    populate(&mut doc, &shape, &mut rng)
        .map_err(|e| LoadBenchError::invalid_input(e.to_string()))?;
    Ok(doc.save())
}

fn populate(
    doc: &mut AutoCommit,
    shape: &DocumentShape,
    rng: &mut StdRng,
) -> Result<(), AutomergeError> {
    match *shape {
        DocumentShape::FlatMap { keys } => {
            let map = doc.put_object(ROOT, "entries", ObjType::Map)?;
            for idx in 0..keys {
                doc.put(&map, format!("key{idx}"), rng.gen_range(0..1_000_000i64))?;
            }
            commit(doc, 0);
        }
        DocumentShape::List { items } => {
            let list = doc.put_object(ROOT, "items", ObjType::List)?;
            for idx in 0..items {
                doc.insert(&list, idx, random_word(rng))?;
            }
            commit(doc, 0);
        }
        DocumentShape::ChangeHistory {
            changes,
            ops_per_change,
        } => {
            let notes = doc.put_object(ROOT, "notes", ObjType::List)?;
            for change in 0..changes {
                for op in 0..ops_per_change {
                    let key = format!("counter{}", rng.gen_range(0..ops_per_change.max(1)));
                    doc.put(ROOT, key, ScalarValue::counter(0))?;
                    doc.insert(&notes, change * ops_per_change + op, random_word(rng))?;
                }
                commit(doc, change as i64);
            }
        }
    }
    Ok(())
}

fn commit(doc: &mut AutoCommit, time: i64) {
    doc.commit_with(CommitOptions::default().with_time(time));
}

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.gen_range(3..12);
    (0..len)
        .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_document(DocumentShape::List { items: 50 }, 7).unwrap();
        let b = generate_document(DocumentShape::List { items: 50 }, 7).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }
}
