// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** _content_ and a [link][ref].\n\n- Bullet point\n  1. Nested item\n- Another item\n\n> Quoted text\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n| a | b |\n| :-- | --: |\n| 1 | 2 |\n\n";
    let mut content = base.repeat(size);
    content.push_str("[ref]: https://example.com \"Example\"\n");
    content
}

#[allow(dead_code)]
pub fn generate_reference_heavy(links: usize) -> String {
    let mut content = String::new();
    for i in 0..links {
        content.push_str(&format!("See [item {i}][r{i}] for details.\n\n"));
    }
    for i in 0..links {
        content.push_str(&format!("[r{i}]: https://example.com/{i}\n"));
    }
    content
}
