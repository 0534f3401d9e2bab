use sggx_slab::io::exr_utils::read_table_exr;
use sggx_slab::materials::ltc::LtcBrdf;
use sggx_slab::core::brdf::BRDF;

fn parse_index(arg: &str) -> Result<usize, String> {
    arg.parse::<usize>().map_err(|_| format!("Not an index: {}", arg))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <table.exr> <alpha_index> <mu_index>", args[0]);
        std::process::exit(1);
    }

    let (x, y) = match (parse_index(&args[2]), parse_index(&args[3])) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(msg), _) | (_, Err(msg)) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    };

    let table = match read_table_exr(&args[1]) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args[1], e);
            std::process::exit(2);
        }
    };
    if x >= table.width() || y >= table.height() {
        eprintln!("Out of bounds: ({}, {}) for size {}x{}", x, y, table.width(), table.height());
        std::process::exit(3);
    }

    let v = table[(x, y)];
    println!("Entry ({}, {}): a {:.6}, b {:.6}, R {:.6}", x, y, v.x, v.y, v.z);
    println!("{}", LtcBrdf::from_coefficients(v.x, v.y, v.z).to_string());
}
