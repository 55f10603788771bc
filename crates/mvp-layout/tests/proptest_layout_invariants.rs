//! Property-based invariant tests for the mvp-layout engines.
//!
//! These tests verify invariants that must hold for **any** input text:
//!
//! 1. Word coverage: both engines emit exactly the input's words, in order.
//! 2. Greedy width: multi-word greedy lines stay narrower than the width.
//! 3. Graph lines are single-spaced with no surrounding whitespace.
//! 4. Graph cost equals the cost model summed over the emitted lines.
//! 5. Graph layout is never worse than greedy under the same model.
//! 6. Graph layout is optimal (matches brute force on short inputs).
//! 7. Determinism: same input always yields identical output.
//! 8. Path structure: START first, END last, levels strictly increasing.
//! 9. Graph size: n(n+1)/2 + 2 nodes without a word bound.
//! 10. Word bound: no candidate line exceeds `max_words_per_line`.
//! 11. Tokenizer offsets slice back to the word text, for any string.

use mvp_layout::{
    CostModel, CostVariant, GraphLayout, LineLayout, SimpleLayout, build_graph, join_words,
    tokenize,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn word_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-Za-z]{1,10}[,.:]?",
        1 => prop_oneof![
            Just("the".to_string()),
            Just("of".to_string()),
            Just("in".to_string()),
            Just("our".to_string()),
            Just("Christ,".to_string()),
        ],
    ]
}

fn words_strategy(max_len: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(word_strategy(), 1..=max_len)
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        6 => Just(" "),
        1 => Just("  "),
        1 => Just("\t"),
        1 => Just(" \n "),
        1 => Just("\u{3000}"),
        1 => Just("\u{a0}"),
    ]
}

/// Words joined with arbitrary whitespace, plus optional padding.
fn messy_text_strategy(max_len: usize) -> impl Strategy<Value = (Vec<String>, String)> {
    words_strategy(max_len)
        .prop_flat_map(|words| {
            let seps = prop::collection::vec(separator_strategy(), words.len());
            (Just(words), seps, any::<bool>())
        })
        .prop_map(|(words, seps, pad)| {
            let mut text = String::new();
            if pad {
                text.push_str("  ");
            }
            for (idx, word) in words.iter().enumerate() {
                if idx > 0 {
                    text.push_str(seps[idx]);
                }
                text.push_str(word);
            }
            if pad {
                text.push('\n');
            }
            (words, text)
        })
}

fn model_strategy() -> impl Strategy<Value = CostModel> {
    (
        prop_oneof![Just(CostVariant::Plain), Just(CostVariant::Linguistic)],
        5.0f64..=60.0,
    )
        .prop_map(|(variant, width)| CostModel::for_variant(variant, width).unwrap())
}

fn line_words(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split_whitespace().map(str::to_string))
        .collect()
}

/// Minimum cost over every partition of `words` into consecutive lines.
fn brute_force_min(words: &[String], model: &CostModel) -> f64 {
    let gaps = words.len() - 1;
    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << gaps) {
        let mut lines = Vec::new();
        let mut current = words[0].clone();
        for (gap, word) in words[1..].iter().enumerate() {
            if mask & (1 << gap) != 0 {
                lines.push(std::mem::take(&mut current));
                current = word.clone();
            } else {
                current.push(' ');
                current.push_str(word);
            }
        }
        lines.push(current);
        best = best.min(model.lines_cost(&lines));
    }
    best
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Word coverage
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn simple_layout_covers_words(
        (words, text) in messy_text_strategy(30),
        width in 1usize..=60,
    ) {
        let lines = SimpleLayout::new(width).unwrap().layout(&text);
        prop_assert_eq!(line_words(&lines), words);
        prop_assert!(lines.iter().all(|line| !line.trim().is_empty()));
    }

    #[test]
    fn graph_layout_covers_words(
        (words, text) in messy_text_strategy(20),
        model in model_strategy(),
    ) {
        let lines = GraphLayout::new(model).layout(&text);
        prop_assert_eq!(line_words(&lines), words);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Greedy width bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn simple_lines_respect_width(
        (_words, text) in messy_text_strategy(30),
        width in 1usize..=60,
    ) {
        for line in SimpleLayout::new(width).unwrap().layout(&text) {
            prop_assert!(
                line.chars().count() < width || !line.contains(char::is_whitespace),
                "line {:?} reached width {}",
                line,
                width
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-5. Graph line shape, cost accounting, never worse than greedy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn graph_lines_are_single_spaced(
        (_words, text) in messy_text_strategy(20),
        model in model_strategy(),
    ) {
        for line in GraphLayout::new(model).layout(&text) {
            prop_assert!(!line.is_empty());
            prop_assert_eq!(line.trim(), line.as_str());
            prop_assert!(!line.contains("  "));
            prop_assert!(!line.contains(['\t', '\n']));
        }
    }

    #[test]
    fn graph_cost_matches_lines(
        words in words_strategy(20),
        model in model_strategy(),
    ) {
        let text = words.join(" ");
        let plan = GraphLayout::new(model.clone()).plan(&text);
        let expected = model.lines_cost(plan.lines());
        prop_assert!(
            (plan.total_cost() - expected).abs() < 1e-6,
            "plan cost {} vs summed {}",
            plan.total_cost(),
            expected
        );
    }

    #[test]
    fn graph_never_worse_than_greedy(
        words in words_strategy(20),
        model in model_strategy(),
        width in 1usize..=60,
    ) {
        let text = words.join(" ");
        let greedy = SimpleLayout::new(width).unwrap().layout(&text);
        let graph = GraphLayout::new(model.clone()).plan(&text);
        let greedy_cost = model.lines_cost(&greedy);
        prop_assert!(
            graph.total_cost() <= greedy_cost + 1e-9,
            "graph {} > greedy {}",
            graph.total_cost(),
            greedy_cost
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Optimality against brute force
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn graph_matches_brute_force(
        words in words_strategy(8),
        model in model_strategy(),
    ) {
        let plan = GraphLayout::new(model.clone()).plan(&words.join(" "));
        let best = brute_force_min(&words, &model);
        prop_assert!(
            (plan.total_cost() - best).abs() < 1e-6,
            "graph {} vs brute force {}",
            plan.total_cost(),
            best
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layouts_are_deterministic(
        (_words, text) in messy_text_strategy(20),
        model in model_strategy(),
    ) {
        let graph = GraphLayout::new(model);
        prop_assert_eq!(graph.layout(&text), graph.layout(&text));
        let first = graph.plan(&text).into_snapshot();
        let second = graph.plan(&text).into_snapshot();
        prop_assert_eq!(first, second);

        let simple = SimpleLayout::default();
        prop_assert_eq!(simple.layout(&text), simple.layout(&text));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Path structure
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn path_runs_start_to_end(
        words in words_strategy(20),
        model in model_strategy(),
    ) {
        let plan = GraphLayout::new(model).plan(&words.join(" "));
        let graph = plan.graph();
        prop_assert_eq!(plan.path().first().copied(), graph.start());
        prop_assert_eq!(plan.path().last().copied(), graph.end());

        let levels: Vec<usize> = plan
            .path()
            .iter()
            .map(|&id| graph.node(id).unwrap().level)
            .collect();
        prop_assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));

        let snapshot = plan.snapshot();
        prop_assert!((snapshot.total_cost() - plan.total_cost()).abs() < 1e-9);
        prop_assert_eq!(snapshot.path_lines(), plan.lines().to_vec());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9-10. Graph size and word bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unbounded_graph_size(words in words_strategy(25)) {
        let text = words.join(" ");
        let tokens = tokenize(&text);
        let n = tokens.len();
        let graph = build_graph(&tokens, &CostModel::default(), n);
        prop_assert_eq!(graph.node_count(), n * (n + 1) / 2 + 2);
        for level in 1..=n {
            prop_assert_eq!(graph.nodes_at_level(level).count(), level);
        }
        prop_assert!(graph.edges().iter().all(|edge| edge.from < edge.to));
    }

    #[test]
    fn word_bound_caps_candidates(
        words in words_strategy(25),
        bound in 1usize..=6,
    ) {
        let text = words.join(" ");
        let tokens = tokenize(&text);
        let graph = build_graph(&tokens, &CostModel::default(), bound);
        prop_assert!(graph.nodes().iter().all(|node| node.word_count() <= bound));

        let lines = GraphLayout::default()
            .with_max_words_per_line(bound)
            .unwrap()
            .layout(&text);
        prop_assert!(lines.iter().all(|line| line.split(' ').count() <= bound));
        prop_assert_eq!(line_words(&lines), words);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 11. Tokenizer offsets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tokenizer_offsets_slice_text((words, text) in messy_text_strategy(30)) {
        let tokens = tokenize(&text);
        let texts: Vec<&str> = tokens.iter().map(|word| word.as_str()).collect();
        prop_assert_eq!(texts.clone(), words.iter().map(String::as_str).collect::<Vec<_>>());
        for token in &tokens {
            prop_assert_eq!(&text[token.start()..token.end()], token.as_str());
        }

        let joined = join_words(&tokens);
        let again: Vec<&str> = tokenize(&joined).iter().map(|word| word.as_str()).collect();
        prop_assert_eq!(again, texts);
    }
}

proptest! {
    #[test]
    fn tokenizer_handles_arbitrary_strings(text in any::<String>()) {
        let tokens = tokenize(&text);
        let expected: Vec<&str> = text.split_whitespace().collect();
        let texts: Vec<&str> = tokens.iter().map(|word| word.as_str()).collect();
        prop_assert_eq!(&texts, &expected);
        for token in &tokens {
            prop_assert!(!token.as_str().is_empty());
            prop_assert!(!token.as_str().contains(char::is_whitespace));
            prop_assert_eq!(text.get(token.start()..token.end()), Some(token.as_str()));
        }

        let joined = join_words(&tokens);
        let again: Vec<&str> = tokenize(&joined).iter().map(|word| word.as_str()).collect();
        prop_assert_eq!(again, texts);
    }

    #[test]
    fn tokenizer_splits_unicode_whitespace(
        words in words_strategy(12),
        seps in prop::collection::vec(
            prop_oneof![
                Just("\u{3000}"),
                Just("\u{a0}"),
                Just("\u{2009}"),
                Just("\u{85}"),
                Just(" \u{2028} "),
            ],
            12,
        ),
    ) {
        let mut text = String::from("\u{3000}");
        for (idx, word) in words.iter().enumerate() {
            if idx > 0 {
                text.push_str(seps[idx]);
            }
            text.push_str(word);
        }
        text.push('\u{a0}');

        let texts: Vec<&str> = tokenize(&text).iter().map(|word| word.as_str()).collect();
        prop_assert_eq!(texts, words.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(line_words(&GraphLayout::default().layout(&text)), words.clone());
        prop_assert_eq!(line_words(&SimpleLayout::default().layout(&text)), words);
    }
}
