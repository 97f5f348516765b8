use kronly::{
    checked::{try_eye_kron, try_kron, try_kron_eye},
    config::KernelConfig,
    layout::{kron_eye_shape, kron_shape},
    leak::LeakTracker,
    linalg::det::det_from_lu,
};
use tracing_subscriber::EnvFilter;

// Helper to print a matrix (assuming column major)
fn print_matrix_col_major(m: usize, n: usize, a: &[f64], name: &str) {
    println!("{name} ({m}x{n}, column-major):");
    if m == 0 || n == 0 {
        println!("  []");
        return;
    }
    let lda = m;
    for i in 0..m {
        print!("  [");
        for j in 0..n {
            let val = a.get(i + j * lda).copied().unwrap_or(f64::NAN);
            print!("{val:.1}");
            if j < n - 1 {
                print!(", ");
            }
        }
        println!("]");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = KernelConfig::from_env()?;
    let copier = config.copier();
    let mut tracker = LeakTracker::new();

    // A = [[1, 2], [3, 4]]
    let a = [1.0, 3.0, 2.0, 4.0];
    let n = 2;
    print_matrix_col_major(2, 2, &a, "A");

    let (rows, cols) = kron_eye_shape((2, 2), n);
    let tag = tracker.record(rows * cols * std::mem::size_of::<f64>(), 1);
    let mut dst = vec![0.0; rows * cols];

    try_kron_eye(&a, 2, 2, n, &mut dst)?;
    print_matrix_col_major(rows, cols, &dst, "kron_eye(A, 2)");

    try_eye_kron(&copier, &a, 2, 2, n, &mut dst)?;
    print_matrix_col_major(rows, cols, &dst, "eye_kron(A, 2)");
    tracker.release(tag)?;

    // A = [[1, 2]], B = [[5], [6]]
    let a = [1.0, 2.0];
    let b = [5.0, 6.0];
    let (rows, cols) = kron_shape((1, 2), (2, 1));
    let _tag = tracker.record(rows * cols * std::mem::size_of::<f64>(), 2);
    let mut dst = vec![0.0; rows * cols];
    try_kron(&copier, &a, 1, 2, &b, 2, 1, &mut dst)?;
    print_matrix_col_major(rows, cols, &dst, "kron(A, B)");

    // det([[0, 2], [3, 1]]) from its LU factors
    let lu = [3.0, 0.0, 1.0, 2.0];
    println!("det from LU: {}", det_from_lu(&lu, &[2, 2], 2));

    // The second buffer is never released, so this reports id 2.
    if let Some(report) = tracker.report() {
        print!("{report}");
    }

    Ok(())
}
