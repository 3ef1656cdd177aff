use std::str::FromStr;

use avl_rwtree::AvlTreeSet;
use log::{error, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() {
    let level = std::env::var("AVL_LOG")
        .ok()
        .and_then(|level| LevelFilter::from_str(&level).ok())
        .unwrap_or(LevelFilter::Info);
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).unwrap();

    let set = AvlTreeSet::new();
    let batches: [&[i64]; 4] = [&[1, 2], &[3], &[4], &[5, 0]];
    for batch in batches {
        for key in batch {
            if let Err(err) = set.insert(*key) {
                error!("{err}");
            }
        }
        set.graph();
        println!();
    }

    println!("{:?}", set.preorder());
    println!("{:?}", set.inorder());
    println!("{:?}", set.postorder());
}
