// Shared by several bench targets; each one uses a different subset.
#![allow(dead_code)]

/// Flat documents: one of every leaf block, repeated.
pub fn generate_markdown_content(copies: usize) -> String {
    const LEAVES: &str = "\
# Title

Setext title
============

Paragraph with `code` and a hard break
on the next line.

    indented code
\tindented with a tab

```rust
fn example() {}
```

<div>
raw html
</div>

***
";
    LEAVES.repeat(copies)
}

/// `sections` top-level sections, each holding containers nested `depth` deep.
pub fn generate_complex_markdown(sections: usize, depth: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("# Section {section}\n\n"));
        push_containers(&mut content, "", depth);
        content.push('\n');
    }
    content
}

fn push_containers(content: &mut String, prefix: &str, depth: usize) {
    if depth == 0 {
        return;
    }
    content.push_str(&format!("{prefix}> Quoted text at depth {depth}.\n"));
    content.push_str("lazy continuation\n");
    for item in 1..=3 {
        content.push_str(&format!("{prefix}{item}. item {item}\n"));
    }
    content.push_str(&format!("{prefix}   - nested bullet\n"));
    content.push_str(&format!("{prefix}     ~~~\n{prefix}     code in a list\n"));
    content.push_str(&format!("{prefix}     ~~~\n\n"));
    push_containers(content, &format!("{prefix}> "), depth - 1);
}

pub fn generate_large_document() -> String {
    let mut content = generate_markdown_content(20);
    content.push_str(&generate_complex_markdown(50, 4));
    content
}
