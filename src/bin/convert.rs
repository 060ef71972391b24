//! CLI surface: `convert IN_LANG OUT_LANG TEXT`.
//!
//! This binary wires up `env_logger`, which is deliberately never
//! initialized by the library itself. Mapping discovery (reading
//! `.csv`/`.tsv`/`.json`/… mapping files from disk) is not part of this
//! crate; this binary's [`transduce_g2p::Registry`] is therefore seeded
//! only from whatever a real deployment's loader would have handed it.
//! `--config` is accepted for CLI-contract compatibility but, absent
//! that loader, only logs that the path was ignored.

use clap::Parser;
use std::process::ExitCode;
use transduce_g2p::cli::ConvertArgs;
use transduce_g2p::{Error, PipelineBuilder, Registry, TransductionGraph};

fn main() -> ExitCode {
    env_logger::init();

    let args = match ConvertArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // clap's own formatted usage/help text.
            eprint!("{e}");
            return ExitCode::from(1);
        }
    };

    if let Some(path) = &args.config {
        log::warn!(
            "--config {} was given, but mapping-file loading is an out-of-scope collaborator \
             in this crate; the path is ignored",
            path.display()
        );
    }

    let registry = match Registry::build(Vec::new()) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    let pipeline = match PipelineBuilder::new(&registry).make(&args.in_lang, &args.out_lang) {
        Ok(p) => p,
        Err(e) => return fail(&e),
    };

    let tok_lang = args.tok_lang.as_deref().unwrap_or(&args.in_lang);
    let graph = if args.should_tokenize() {
        let tokenizer = registry.tokenizer_for_pair(tok_lang, &args.out_lang);
        let mut output = String::new();
        let mut combined_edges = Vec::new();
        let mut offset_in = 0usize;
        let mut offset_out = 0usize;
        for token in tokenizer.tokenize(&args.text) {
            let piece_graph = if token.is_word {
                pipeline.apply(&token.text)
            } else {
                TransductionGraph {
                    tiers: vec![transduce_g2p::TransductionTier::identity(&token.text)],
                }
            };
            if args.debugger {
                print_trace(&token.text, &pipeline, token.is_word);
            }
            for (i, j) in piece_graph.composed_edges() {
                combined_edges.push((i.map(|v| v + offset_in), j.map(|v| v + offset_out)));
            }
            offset_in += piece_graph.input_string().chars().count();
            offset_out += piece_graph.output_string().chars().count();
            output.push_str(piece_graph.output_string());
        }
        TransductionGraph {
            tiers: vec![transduce_g2p::TransductionTier {
                input_string: args.text.clone(),
                output_string: output,
                edges: combined_edges,
            }],
        }
    } else {
        if args.debugger {
            print_trace(&args.text, &pipeline, true);
        }
        pipeline.apply(&args.text)
    };

    if args.check {
        if let Some(last) = pipeline.transducers().last() {
            let bad = last.mapping().validate_output(graph.output_string());
            if !bad.is_empty() {
                log::warn!(
                    "output contains characters outside the output inventory: {bad:?}"
                );
            }
        }
    }

    if args.pretty_edges {
        println!("{}", graph.output_string());
        println!("---");
        for (i, j) in graph.composed_edges() {
            println!("{} -> {}", fmt_idx(i), fmt_idx(j));
        }
    } else {
        println!("{}", graph.output_string());
    }

    ExitCode::SUCCESS
}

fn fmt_idx(i: Option<usize>) -> String {
    match i {
        Some(i) => i.to_string(),
        None => "∅".to_string(),
    }
}

fn print_trace(text: &str, pipeline: &transduce_g2p::CompositeTransducer, is_word: bool) {
    if !is_word {
        return;
    }
    let (_, traces) = pipeline.apply_with_trace(text);
    for (hop, trace) in traces.iter().enumerate() {
        for applied in trace {
            eprintln!(
                "[hop {hop}] rule {} ({:?} -> {:?}) @ {}: {:?} => {:?}",
                applied.rule_index,
                applied.input_template,
                applied.output_template,
                applied.matched_at,
                applied.before,
                applied.after
            );
        }
    }
}

fn fail(e: &Error) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::from(e.cli_exit_code() as u8)
}
