// =========================================================================
// FALSIFY-MX: Matrix storage contract
//
// The scaler, the LVQ codebook and the KNN reference set all index rows by
// position, so row order and row contents must survive every constructor.
// =========================================================================

use super::*;

/// FALSIFY-MX-001: from_rows and from_vec agree on row-major layout
#[test]
fn falsify_mx_001_row_major_layout() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).expect("valid");
    let b = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    assert_eq!(a, b, "FALSIFIED MX-001: from_rows and from_vec disagree");
}

/// FALSIFY-MX-002: select_rows with identity indices is the identity
#[test]
fn falsify_mx_002_select_identity() {
    let a = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let same = a.select_rows(&[0, 1, 2]);
    assert_eq!(same, a, "FALSIFIED MX-002: select_rows(0..n) != A");
}

/// FALSIFY-MX-003: row(i)[j] == get(i, j)
#[test]
fn falsify_mx_003_row_get_consistent() {
    let a = Matrix::from_vec(3, 3, (0..9).map(f64::from).collect()).expect("valid");
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(
                a.row(i)[j],
                a.get(i, j),
                "FALSIFIED MX-003: row({i})[{j}] != get({i}, {j})"
            );
        }
    }
}

/// FALSIFY-MX-004: total == sum of row sums == sum of column sums
#[test]
fn falsify_mx_004_sums_consistent() {
    let cm = Matrix::from_vec(3, 3, vec![4_usize, 1, 0, 2, 5, 1, 0, 0, 6]).expect("valid");
    let by_rows: usize = (0..3).map(|i| cm.row_sum(i)).sum();
    let by_cols: usize = (0..3).map(|j| cm.col_sum(j)).sum();
    assert_eq!(cm.total(), 19);
    assert_eq!(by_rows, cm.total(), "FALSIFIED MX-004: row sums != total");
    assert_eq!(by_cols, cm.total(), "FALSIFIED MX-004: col sums != total");
}
