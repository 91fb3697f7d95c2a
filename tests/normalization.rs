use std::io::Write;

use study_core::nlp::{normalize, LanguageConfig, LanguageResources, Lemmatizer, StopwordSet};
use tempfile::NamedTempFile;

fn english() -> LanguageResources {
    LanguageResources::english()
}

#[test]
fn stopwords_are_removed_and_order_is_kept() {
    let tokens = normalize("The cat sat. The cat ran. The dog slept.", &english());
    assert_eq!(tokens, vec!["cat", "sat", "cat", "ran", "dog", "slept"]);
}

#[test]
fn digits_and_punctuation_are_deleted_not_replaced() {
    let tokens = normalize("State-of-the-art results in 2024: numbers!", &english());
    assert_eq!(tokens, vec!["stateoftheart", "result", "number"]);
}

#[test]
fn words_of_two_letters_or_fewer_are_dropped() {
    let tokens = normalize("ox go at big AI", &english());
    assert_eq!(tokens, vec!["big"]);
}

#[test]
fn plurals_reduce_to_noun_base_form() {
    let tokens = normalize(
        "Children carried boxes, churches, houses, classes and studies",
        &english(),
    );
    assert_eq!(
        tokens,
        vec!["child", "carried", "box", "church", "house", "class", "study"]
    );
}

#[test]
fn plural_looking_singulars_are_left_alone() {
    let lemmatizer = Lemmatizer::new();
    for word in ["analysis", "status", "glass", "series", "news", "physics"] {
        assert_eq!(lemmatizer.lemmatize(word), word);
    }
    assert_eq!(lemmatizer.lemmatize("ties"), "tie");
    assert_eq!(lemmatizer.lemmatize("responses"), "response");
}

#[test]
fn non_ascii_letters_are_stripped_like_punctuation() {
    let tokens = normalize("Café naïve", &english());
    assert_eq!(tokens, vec!["caf", "nave"]);
}

#[test]
fn degenerate_input_yields_no_tokens() {
    assert!(normalize("", &english()).is_empty());
    assert!(normalize("123 !!! -- 42", &english()).is_empty());
    assert!(normalize("the and of to", &english()).is_empty());
}

#[test]
fn words_that_only_look_plural_are_not_cut_down() {
    let tokens = normalize(
        "always perhaps whereas sometimes includes prairies",
        &english(),
    );
    assert_eq!(
        tokens,
        vec!["always", "perhaps", "whereas", "sometimes", "includes", "prairie"]
    );
}

#[test]
fn every_lemma_is_a_known_noun_or_the_word_itself() {
    let lemmatizer = Lemmatizer::new();
    let text = "uses cases axes lives species thus bonus campus alias canvas \
                genius various previous famous nervous across unless anxious";

    for word in text.split_whitespace() {
        let lemma = lemmatizer.lemmatize(word);
        assert!(
            lemma == word || lemmatizer.knows(&lemma),
            "{word} -> {lemma}"
        );
    }
    assert_eq!(lemmatizer.lemmatize("uses"), "use");
    assert_eq!(lemmatizer.lemmatize("axes"), "axis");
    assert_eq!(lemmatizer.lemmatize("various"), "various");
}

#[test]
fn lexicon_extends_the_builtin_nouns() {
    let lemmatizer = Lemmatizer::new();
    // Unknown to the built-in lexicon: unchanged
    assert_eq!(lemmatizer.lemmatize("zorbs"), "zorbs");
    assert!(lemmatizer.knows("house"));

    let lemmatizer = lemmatizer.with_lexicon(["Zorb", "quokka"]);
    assert_eq!(lemmatizer.lemmatize("zorbs"), "zorb");
    assert_eq!(lemmatizer.lemmatize("quokkas"), "quokka");
    assert_eq!(lemmatizer.lemmatize("houses"), "house");
    // Exceptions apply regardless of the lexicon
    assert_eq!(lemmatizer.lemmatize("children"), "child");
}

#[test]
fn english_stopword_list_is_complete() {
    let set = StopwordSet::english();
    assert_eq!(set.len(), 179);
    assert!(set.contains("the"));
    assert!(set.contains("themselves"));
    assert!(!set.contains("cat"));
}

#[test]
fn configured_files_extend_the_builtin_resources() {
    let mut stopwords = NamedTempFile::new().unwrap();
    writeln!(stopwords, "# project specific").unwrap();
    writeln!(stopwords, "Cat").unwrap();
    writeln!(stopwords).unwrap();

    let mut lexicon = NamedTempFile::new().unwrap();
    writeln!(lexicon, "# local terms").unwrap();
    writeln!(lexicon, "zorb").unwrap();

    let config = LanguageConfig {
        extra_stopwords_path: Some(stopwords.path().to_path_buf()),
        lexicon_path: Some(lexicon.path().to_path_buf()),
    };
    let resources = LanguageResources::load(&config).unwrap();

    assert_eq!(
        resources.lemmatizer.lexicon_len(),
        Lemmatizer::new().lexicon_len() + 1
    );
    let tokens = normalize("The cat chased zorbs and dogs.", &resources);
    assert_eq!(tokens, vec!["chased", "zorb", "dog"]);
}

#[test]
fn missing_resource_file_is_an_error() {
    let config = LanguageConfig {
        extra_stopwords_path: Some("/nonexistent/stopwords.txt".into()),
        lexicon_path: None,
    };
    assert!(LanguageResources::load(&config).is_err());
}

#[test]
fn shared_resources_are_built_once() {
    let a = LanguageResources::shared();
    let b = LanguageResources::shared();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
