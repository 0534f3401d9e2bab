// Copyright @yucwang 2026

use std::fmt::Write as _;
use std::fs;

use crate::io::TableIoError;
use crate::math::bitmap::Bitmap;

const ENTRIES_PER_LINE: usize = 3;

/// Render a fitted table as a C++ array initializer,
/// `const Vector3f <name>[alpha_res][mu_res] = { ... };`, grouped by
/// roughness.
pub fn format_table_source(table: &Bitmap, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "const Vector3f {}[{}][{}] = {{", name, table.width(), table.height());

    for x in 0..table.width() {
        out.push_str("    {\n");
        for y in 0..table.height() {
            if y % ENTRIES_PER_LINE == 0 {
                out.push_str("        ");
            }
            let v = table[(x, y)];
            let _ = write!(out, "Vector3f({:.5}, {:.5}, {:.5})", v.x, v.y, v.z);
            if y + 1 < table.height() {
                out.push(',');
                if y % ENTRIES_PER_LINE == ENTRIES_PER_LINE - 1 {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            } else {
                out.push('\n');
            }
        }
        out.push_str("    }");
        if x + 1 < table.width() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};\n");
    out
}

pub fn write_table_source(table: &Bitmap, name: &str, file_path: &str) -> Result<(), TableIoError> {
    log::info!("Writing table source: {}.", file_path);
    fs::write(file_path, format_table_source(table, name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::format_table_source;
    use crate::math::bitmap::Bitmap;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_declared_dimensions_and_entries() {
        let mut table = Bitmap::new(2, 4);
        table[(1, 3)] = Vector3f::new(0.5, -0.125, 1.0);
        let text = format_table_source(&table, "ltcTable");

        assert!(text.starts_with("const Vector3f ltcTable[2][4] = {\n"));
        assert!(text.ends_with("};\n"));
        assert_eq!(text.matches("Vector3f(").count(), 8);
        assert!(text.contains("Vector3f(0.50000, -0.12500, 1.00000)\n    }\n};"));
    }

    #[test]
    fn test_three_entries_per_line() {
        let table = Bitmap::new(1, 4);
        let text = format_table_source(&table, "t");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2].matches("Vector3f(").count(), 3);
        assert_eq!(lines[3].matches("Vector3f(").count(), 1);
    }
}
