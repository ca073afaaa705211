//! Row chunking.

use colsplit_model::{Chunk, Dataset, RowsPerFile};

/// Split `dataset` into consecutive parts of at most `rows_per_file` rows.
///
/// A limit that would not split the dataset (unbounded, or at least as large
/// as the row count) yields exactly one chunk holding everything, including
/// when the dataset has no rows. Parts are numbered from 1.
pub fn chunk(dataset: &Dataset, rows_per_file: RowsPerFile) -> Vec<Chunk<'_>> {
    let chunks: Vec<Chunk<'_>> = match rows_per_file.effective_for(dataset.len()) {
        RowsPerFile::Unbounded => vec![dataset.as_chunk()],
        RowsPerFile::Limit(limit) => dataset
            .rows()
            .chunks(limit.get())
            .enumerate()
            .map(|(index, rows)| Chunk {
                part: index + 1,
                columns: dataset.columns(),
                rows,
            })
            .collect(),
    };
    tracing::debug!(
        rows = dataset.len(),
        limit = %rows_per_file,
        chunks = chunks.len(),
        "chunked dataset"
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Dataset {
        Dataset::new(
            vec!["n".to_string()],
            (0..count).map(|n| vec![Some(n.to_string())]).collect(),
        )
    }

    #[test]
    fn splits_into_bounded_parts() {
        let dataset = numbered(25);
        let chunks = chunk(&dataset, RowsPerFile::from_count(10));
        let sizes: Vec<usize> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(sizes, vec![10, 10, 5]);
        let parts: Vec<usize> = chunks.iter().map(|c| c.part).collect();
        assert_eq!(parts, vec![1, 2, 3]);
        assert_eq!(chunks[2].rows[0], vec![Some("20".to_string())]);
    }

    #[test]
    fn limit_equal_to_rows_is_single_chunk() {
        let dataset = numbered(10);
        let chunks = chunk(&dataset, RowsPerFile::from_count(10));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 10);
    }

    #[test]
    fn unbounded_is_single_chunk() {
        let dataset = numbered(3);
        assert_eq!(chunk(&dataset, RowsPerFile::Unbounded).len(), 1);
    }

    #[test]
    fn empty_dataset_yields_one_empty_chunk() {
        let dataset = Dataset::empty(vec!["a".to_string()]);
        let chunks = chunk(&dataset, RowsPerFile::from_count(5));
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
        assert_eq!(chunks[0].columns, ["a"]);
    }
}
