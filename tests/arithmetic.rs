//! Sum and product of linked sparse matrices

use ringmat::{multiply, multiply_with_config, sum, to_dense, ArithmeticConfig, SparseMatrix};

/// Create a 4x4 test matrix:
/// [1 2 0 0]
/// [0 3 4 0]
/// [0 0 5 6]
/// [7 0 0 8]
fn create_test_matrix() -> SparseMatrix<f64> {
    SparseMatrix::from_triplets(
        4,
        4,
        vec![
            (1, 1, 1.0),
            (1, 2, 2.0),
            (2, 2, 3.0),
            (2, 3, 4.0),
            (3, 3, 5.0),
            (3, 4, 6.0),
            (4, 1, 7.0),
            (4, 4, 8.0),
        ],
    )
    .unwrap()
}

fn create_other_matrix() -> SparseMatrix<f64> {
    SparseMatrix::from_triplets(
        4,
        4,
        vec![(1, 1, -1.0), (1, 3, 9.0), (2, 4, 2.5), (4, 4, -8.0), (4, 2, 1.0)],
    )
    .unwrap()
}

#[test]
fn test_sum_is_commutative() {
    let a = create_test_matrix();
    let b = create_other_matrix();

    assert_eq!(sum(&a, &b).unwrap(), sum(&b, &a).unwrap());
}

#[test]
fn test_sum_is_cellwise() {
    let a = create_test_matrix();
    let b = create_other_matrix();
    let c = sum(&a, &b).unwrap();

    for i in 1..=4 {
        for j in 1..=4 {
            assert_eq!(
                c.get(i, j).unwrap(),
                a.get(i, j).unwrap() + b.get(i, j).unwrap(),
                "mismatch at ({i}, {j})"
            );
        }
    }

    // (1, 1) and (4, 4) cancel to zero and are not stored
    assert_eq!(c.count_non_zero(), 9);
    assert!(c.is_consistent());
}

#[test]
fn test_sum_leaves_operands_untouched() {
    let a = create_test_matrix();
    let b = create_other_matrix();
    let _ = sum(&a, &b).unwrap();

    assert_eq!(a, create_test_matrix());
    assert_eq!(b, create_other_matrix());
}

#[test]
fn test_multiply_matches_dense_product() {
    let a = create_test_matrix();
    let b = create_other_matrix();

    let c = multiply(&a, &b).unwrap();
    let expected = to_dense(&a).dot(&to_dense(&b));

    assert_eq!(to_dense(&c), expected);
    assert!(c.is_consistent());
}

#[test]
fn test_multiply_selector_picks_row() {
    // E(1, 3) = 1 selects row 3 of A into row 1 of the product
    let a = create_test_matrix();
    let selector = SparseMatrix::from_triplets(1, 4, vec![(1, 3, 1.0)]).unwrap();

    let row = multiply(&selector, &a).unwrap();

    assert_eq!(row.dimensions(), (1, 4));
    assert_eq!(
        row.triplets().collect::<Vec<_>>(),
        vec![(1, 3, 5.0), (1, 4, 6.0)]
    );
}

#[test]
fn test_multiply_selector_picks_column() {
    // E(2, 1) = 1 selects column 2 of A into column 1 of the product
    let a = create_test_matrix();
    let selector = SparseMatrix::from_triplets(4, 1, vec![(2, 1, 1.0)]).unwrap();

    let col = multiply(&a, &selector).unwrap();

    assert_eq!(col.dimensions(), (4, 1));
    assert_eq!(
        col.triplets().collect::<Vec<_>>(),
        vec![(1, 1, 2.0), (2, 1, 3.0)]
    );
}

#[test]
fn test_rectangular_product_shape() {
    let a = SparseMatrix::from_triplets(2, 3, vec![(1, 3, 2.0), (2, 1, 1.0)]).unwrap();
    let b = SparseMatrix::from_triplets(3, 4, vec![(3, 4, 5.0), (1, 2, -1.0)]).unwrap();

    let c = multiply(&a, &b).unwrap();

    assert_eq!(c.dimensions(), (2, 4));
    assert_eq!(
        c.triplets().collect::<Vec<_>>(),
        vec![(1, 4, 10.0), (2, 2, -1.0)]
    );
}

#[test]
fn test_accumulators_agree() {
    let a = create_test_matrix();
    let b = create_other_matrix();

    let dense = multiply_with_config(&a, &b, &ArithmeticConfig::dense_only()).unwrap();
    let sorted = multiply_with_config(&a, &b, &ArithmeticConfig::sort_only()).unwrap();

    assert_eq!(dense, sorted);
}

#[test]
fn test_empty_operands() {
    let a = SparseMatrix::<f64>::new(3, 2).unwrap();
    let b = SparseMatrix::<f64>::new(2, 5).unwrap();

    let c = multiply(&a, &b).unwrap();

    assert_eq!(c.dimensions(), (3, 5));
    assert_eq!(c.count_non_zero(), 0);
    assert_eq!(sum(&a, &a).unwrap().count_non_zero(), 0);
}
