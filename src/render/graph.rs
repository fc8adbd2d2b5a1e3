// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::io;

use crate::engine::ProcessorNode;
use crate::traits::{Processor, Traceable};

const HTML_TEMPLATE_HEAD: &str = r#"<html>
    <body>
        <script src="https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js"></script>
        <script>
            mermaid.initialize({ startOnLoad: true, theme: 'dark' });
        </script>

        <div class="mermaid">
"#;

const HTML_TEMPLATE_TAIL: &str = r#"
        </div>
    </body>
</html>
"#;

/// Mermaid flowchart of a processor tree.
///
/// Every composite becomes an entry and an exit node around its children.
/// Fanout and sequential edges are solid; parallel edges are dotted, since
/// each item takes only one of them. Node ids are numbered in walk order, so
/// the same tree always renders to the same text.
///
/// ```text
/// graph TD
/// n0[Input]
/// n1[Output]
/// n2[/Sequential/main\]
/// n3[\Sequential/main/end/]
/// n4[shout]
/// n2 --> n4
/// n4 --> n3
/// n0 --> n2
/// n3 --> n1
/// ```
pub struct ProcessorGraph<'a, E> {
    root: &'a ProcessorNode<E>,
}

struct Lines {
    lines: Vec<String>,
    next_id: usize,
}

impl Lines {
    fn id(&mut self) -> String {
        let id = format!("n{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl<'a, E: Traceable> ProcessorGraph<'a, E> {
    pub fn new(root: &'a ProcessorNode<E>) -> Self {
        Self { root }
    }

    /// The Mermaid source, starting with `graph TD`.
    pub fn render(&self) -> String {
        let mut out = Lines {
            lines: vec!["graph TD".to_string()],
            next_id: 0,
        };

        let input = out.id();
        let output = out.id();
        out.push(format!("{}[Input]", input));
        out.push(format!("{}[Output]", output));

        let (entry, exit) = walk(&mut out, self.root);

        out.push(format!("{} --> {}", input, entry));
        out.push(format!("{} --> {}", exit, output));

        out.lines.join("\n")
    }

    pub fn write<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
        dest.write_all(self.render().as_bytes())
    }

    /// A standalone page that renders the graph with mermaid.js.
    pub fn write_html<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
        dest.write_all(HTML_TEMPLATE_HEAD.as_bytes())?;
        dest.write_all(self.render().as_bytes())?;
        dest.write_all(HTML_TEMPLATE_TAIL.as_bytes())
    }
}

impl<E: Traceable> fmt::Display for ProcessorGraph<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Emit `node` and return the ids of its entry and exit.
fn walk<E: Traceable>(out: &mut Lines, node: &ProcessorNode<E>) -> (String, String) {
    let label = match node {
        ProcessorNode::Fanout(_) => "FanOut",
        ProcessorNode::Sequential(_) => "Sequential",
        ProcessorNode::Parallel(_) => "Parallel",
        ProcessorNode::Leaf(leaf) => {
            let id = out.id();
            out.push(format!("{}[{}]", id, leaf.name()));
            return (id.clone(), id);
        }
    };

    let entry = out.id();
    let exit = out.id();
    let chain = node.chain_name();
    out.push(format!("{}[/{}/{}\\]", entry, label, chain));
    out.push(format!("{}[\\{}/{}/end/]", exit, label, chain));

    match node {
        ProcessorNode::Sequential(_) => {
            let mut previous = entry.clone();
            for child in node.children() {
                let (child_entry, child_exit) = walk(out, child);
                out.push(format!("{} --> {}", previous, child_entry));
                previous = child_exit;
            }
            out.push(format!("{} --> {}", previous, exit));
        }
        _ => {
            let arrow = if matches!(node, ProcessorNode::Parallel(_)) { "-.->" } else { "-->" };
            for child in node.children() {
                let (child_entry, child_exit) = walk(out, child);
                out.push(format!("{} {} {}", entry, arrow, child_entry));
                out.push(format!("{} {} {}", child_exit, arrow, exit));
            }
        }
    }

    (entry, exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{PassthroughProcessor, TestItem};

    fn leaf(name: &str) -> ProcessorNode<TestItem> {
        ProcessorNode::leaf(PassthroughProcessor::new(name))
    }

    #[test]
    fn test_sequential_chain() {
        let tree = ProcessorNode::sequential("main", vec![leaf("a"), leaf("b")]);

        let expected = [
            "graph TD",
            "n0[Input]",
            "n1[Output]",
            "n2[/Sequential/main\\]",
            "n3[\\Sequential/main/end/]",
            "n4[a]",
            "n2 --> n4",
            "n5[b]",
            "n4 --> n5",
            "n5 --> n3",
            "n0 --> n2",
            "n3 --> n1",
        ]
        .join("\n");

        assert_eq!(ProcessorGraph::new(&tree).render(), expected);
    }

    #[test]
    fn test_fanout_and_parallel_edges() {
        let tree = ProcessorNode::fanout(
            "split",
            vec![leaf("a"), ProcessorNode::parallel("pool", vec![leaf("w")])],
        );

        let rendered = ProcessorGraph::new(&tree).to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines.contains(&"n2[/FanOut/split\\]"));
        assert!(lines.contains(&"n3[\\FanOut/split/end/]"));
        assert!(lines.contains(&"n2 --> n4"));
        assert!(lines.contains(&"n4 --> n3"));
        assert!(lines.contains(&"n5[/Parallel/pool\\]"));
        assert!(lines.contains(&"n5 -.-> n7"));
        assert!(lines.contains(&"n7 -.-> n6"));
        assert!(lines.contains(&"n2 --> n5"));
        assert!(lines.contains(&"n6 --> n3"));
    }

    #[test]
    fn test_lone_leaf_and_html() {
        let tree = leaf("solo");
        let graph = ProcessorGraph::new(&tree);

        assert_eq!(
            graph.render(),
            "graph TD\nn0[Input]\nn1[Output]\nn2[solo]\nn0 --> n2\nn2 --> n1"
        );

        let mut page = Vec::new();
        graph.write_html(&mut page).unwrap();
        let page = String::from_utf8(page).unwrap();
        assert!(page.starts_with("<html>"));
        assert!(page.contains("mermaid.min.js"));
        assert!(page.contains("n2[solo]"));
    }
}
