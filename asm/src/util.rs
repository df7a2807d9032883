use crate::Output;
use color_print::cformat;

/// Listing of every source line with its address and machine word, on stderr.
pub fn print_dump(path: &str, output: &Output) {
    eprintln!(
        "{}+------[{}]{}",
        "-".repeat(12),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    for row in &output.rows {
        let line_num = row.line + 1;
        let Some(line) = &row.parsed else {
            eprintln!("{:12}| {:>4}: {}", "", line_num, row.text);
            continue;
        };

        let comment_str = line
            .comment
            .as_ref()
            .map(|s| format!(";{}", s))
            .unwrap_or_default();
        let labels: String = line
            .labels
            .iter()
            .map(|label| cformat!("<g>{}:</> ", label))
            .collect();

        let body = match &line.code {
            Some(inst) => {
                let bin_str = match output.words.get(row.addr as usize) {
                    Some(word) => format!("{:>4}", output.target.hex(*word)),
                    None => cformat!("<r,s>!!!!</>"),
                };
                format!(
                    "[{:04X}] {} | {:>4}: {}{} {}",
                    row.addr,
                    bin_str,
                    line_num,
                    labels,
                    inst.cformat(),
                    comment_str
                )
            }
            None => format!("{:12}| {:>4}: {}{}", "", line_num, labels, comment_str),
        };
        eprintln!("{}", body);
    }
    eprintln!("{}+{}", "-".repeat(12), "-".repeat(53));

    for (name, addr) in output.labels.iter() {
        eprintln!("{}", cformat!("<g>{:>12}</> = 0x{:04X}", name, addr));
    }
}
