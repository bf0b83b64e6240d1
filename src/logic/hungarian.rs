//! Minimum-cost assignment over a rectangular cost matrix (Kuhn–Munkres with potentials).

/// Assign rows to columns minimizing total cost. Returns `(row, column)` pairs sorted by row;
/// `min(rows, columns)` pairs for a non-empty matrix, nothing for an empty one.
pub fn min_cost_assignment(cost: &[Vec<i64>]) -> Vec<(usize, usize)> {
    let rows = cost.len();
    let cols = cost.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    if rows <= cols {
        return assign_rows(cost);
    }
    // More rows than columns: solve the transpose and swap back.
    let transposed: Vec<Vec<i64>> = (0..cols)
        .map(|c| (0..rows).map(|r| cost[r][c]).collect())
        .collect();
    let mut result: Vec<(usize, usize)> = assign_rows(&transposed)
        .into_iter()
        .map(|(c, r)| (r, c))
        .collect();
    result.sort_unstable();
    result
}

/// Requires `rows <= cols`. Every row gets a distinct column.
fn assign_rows(cost: &[Vec<i64>]) -> Vec<(usize, usize)> {
    let n = cost.len();
    let m = cost[0].len();
    // 1-based: index 0 of `col_owner` is the virtual column used to grow each augmenting path.
    let mut row_pot = vec![0i64; n + 1];
    let mut col_pot = vec![0i64; m + 1];
    let mut col_owner = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for row in 1..=n {
        col_owner[0] = row;
        let mut j0 = 0;
        let mut min_slack = vec![i64::MAX; m + 1];
        let mut used = vec![false; m + 1];
        loop {
            used[j0] = true;
            let i0 = col_owner[j0];
            let mut delta = i64::MAX;
            let mut j1 = 0;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let reduced = cost[i0 - 1][j - 1] - row_pot[i0] - col_pot[j];
                if reduced < min_slack[j] {
                    min_slack[j] = reduced;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    row_pot[col_owner[j]] += delta;
                    col_pot[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if col_owner[j0] == 0 {
                break;
            }
        }
        // Flip the augmenting path.
        loop {
            let j1 = way[j0];
            col_owner[j0] = col_owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut result: Vec<(usize, usize)> = (1..=m)
        .filter(|&j| col_owner[j] != 0)
        .map(|j| (col_owner[j] - 1, j - 1))
        .collect();
    result.sort_unstable();
    result
}
