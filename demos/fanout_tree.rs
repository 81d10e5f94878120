//! Builds a fan-out tree from boundary levels and prints its shape.
//!
//! Run with:
//!     cargo run --example fanout_tree

use hashsplit::{FanoutBuilder, FanoutNode, SplitConfig, split_bytes};

fn print_node(node: &FanoutNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        FanoutNode::Leaf(desc) => println!("{}leaf {}", indent, desc),
        FanoutNode::Branch {
            level, children, ..
        } => {
            println!(
                "{}branch L{} {:?} ({} children)",
                indent,
                level,
                node.range(),
                children.len()
            );
            for child in children {
                print_node(child, depth + 1);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..256 * 1024u32)
        .map(|i| (i.wrapping_mul(2_246_822_519) >> 15) as u8)
        .collect();

    // Small chunks and two bits per level keep the tree readable
    let config = SplitConfig::new(10, 64, 16 * 1024)?.with_fan_bits(2);

    let mut builder = FanoutBuilder::new();
    for chunk in split_bytes(config, &data)? {
        builder.push(chunk.descriptor);
    }

    match builder.finish() {
        Some(root) => {
            println!("depth {}, {} leaves\n", root.depth(), root.leaves().len());
            print_node(&root, 0);
        }
        None => println!("empty input"),
    }

    Ok(())
}
