//! End-to-end runs of the commit pipeline against in-memory collaborators

use luna::commit::{CommitMessageGenerator, create_commit_prompt};
use luna::config::Settings;
use luna::git::IgnoreMatcher;
use luna::pipeline::{
    COMPLETE_DISPLAY_DELAY, EffectRunner, ExitRequest, FileStatus, HeadlessMode, Lifecycle, PipelineEvent,
    PipelineSession, run_headless,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use test_utils::{FakeVcs, ScriptedProvider};

fn settings(prefixes: &[&str], patterns: &[&str]) -> Settings {
    Settings {
        commit_prefixes: prefixes.iter().map(|p| (*p).to_string()).collect(),
        ignored_patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        ..Settings::default()
    }
}

fn runner(vcs: Arc<FakeVcs>, replies: &[Option<&str>], settings: Settings) -> EffectRunner {
    let provider = Arc::new(ScriptedProvider::new(replies));
    let generator = Arc::new(CommitMessageGenerator::new(
        provider,
        settings,
        false,
        StdRng::seed_from_u64(5),
    ));
    EffectRunner::new(vcs, generator)
}

#[tokio::test]
async fn test_ignored_file_is_shown_but_not_committed() {
    let vcs = Arc::new(FakeVcs::with_files(&["a.txt", "logo.png"]));
    let settings = settings(&["feat:"], &["*.png"]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("feat: add a")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::CommitAll).await;

    assert_eq!(session.lifecycle, Lifecycle::Complete);
    assert_eq!(session.status("logo.png").to_string(), "Ignored");
    assert_eq!(vcs.diffed(), vec!["a.txt"]);
    assert_eq!(
        vcs.committed(),
        vec![("a.txt".to_string(), "feat: add a".to_string())]
    );
}

#[tokio::test]
async fn test_empty_generation_falls_back_to_update_message() {
    let vcs = Arc::new(FakeVcs::with_files(&["notes.md"]));
    let settings = settings(&[], &[]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::DryRun).await;

    assert_eq!(session.lifecycle, Lifecycle::Review);
    assert_eq!(session.message("notes.md"), Some("update notes.md"));
    assert!(vcs.committed().is_empty());
}

#[tokio::test]
async fn test_provider_failure_uses_prefixed_fallback() {
    let vcs = Arc::new(FakeVcs::with_files(&["log.rs"]));
    let settings = settings(&["chore:"], &[]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[None], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::DryRun).await;

    assert_eq!(session.message("log.rs"), Some("chore: update log.rs"));
    assert_eq!(session.status("log.rs"), &FileStatus::Generated);
}

#[tokio::test]
async fn test_zero_staged_files_completes_without_calls() {
    let vcs = Arc::new(FakeVcs::default());
    let settings = Settings::default();
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("unused")], settings);

    let mut session = PipelineSession::new();
    let exit = runner
        .drive(&mut session, &matcher, PipelineEvent::Start)
        .await;

    assert_eq!(exit, Some(ExitRequest::After(COMPLETE_DISPLAY_DELAY)));
    assert_eq!(session.lifecycle, Lifecycle::Complete);
    assert!(vcs.diffed().is_empty());
    assert!(vcs.committed().is_empty());
}

#[tokio::test]
async fn test_list_failure_ends_in_error() {
    let vcs = Arc::new(FakeVcs {
        list_error: Some("not a git repository".to_string()),
        ..FakeVcs::default()
    });
    let settings = Settings::default();
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("unused")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::CommitAll).await;

    assert_eq!(session.lifecycle, Lifecycle::Error);
    assert_eq!(
        session.last_error.as_deref(),
        Some("error running git diff --cached: not a git repository")
    );
}

#[tokio::test]
async fn test_diff_failure_is_per_file() {
    let mut fake = FakeVcs::with_files(&["broken.rs", "ok.rs"]);
    fake.diff_errors
        .insert("broken.rs".to_string(), "bad object".to_string());
    let vcs = Arc::new(fake);
    let settings = settings(&["fix:"], &[]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("fix: ok")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::CommitAll).await;

    assert_eq!(session.lifecycle, Lifecycle::Complete);
    assert_eq!(
        session.status("broken.rs").to_string(),
        "Error: error getting diff for broken.rs: bad object"
    );
    assert_eq!(
        vcs.committed(),
        vec![("ok.rs".to_string(), "fix: ok".to_string())]
    );
}

#[tokio::test]
async fn test_commit_failure_stops_the_run() {
    let mut fake = FakeVcs::with_files(&["a.rs", "b.rs", "c.rs"]);
    fake.commit_errors
        .insert("b.rs".to_string(), "pre-commit hook failed".to_string());
    let vcs = Arc::new(fake);
    let settings = settings(&["feat:"], &[]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("feat: change")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::CommitAll).await;

    assert_eq!(session.lifecycle, Lifecycle::Error);
    assert_eq!(
        session.last_error.as_deref(),
        Some("error committing b.rs: pre-commit hook failed")
    );
    let committed: Vec<String> = vcs.committed().into_iter().map(|(p, _)| p).collect();
    assert_eq!(committed, vec!["a.rs"]);
}

#[tokio::test]
async fn test_retry_touches_only_selected_file() {
    let vcs = Arc::new(FakeVcs::with_files(&["a.rs", "b.rs"]));
    let settings = settings(&["feat:", "fix:"], &[]);
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(
        Arc::clone(&vcs),
        &[Some("feat: first a"), Some("feat: first b"), Some("fix: second b")],
        settings,
    );

    let mut session = PipelineSession::new();
    runner
        .drive(&mut session, &matcher, PipelineEvent::Start)
        .await;
    assert_eq!(session.lifecycle, Lifecycle::Review);

    runner
        .drive(&mut session, &matcher, PipelineEvent::SelectNext)
        .await;
    runner
        .drive(&mut session, &matcher, PipelineEvent::Retry)
        .await;

    assert_eq!(session.lifecycle, Lifecycle::Review);
    assert_eq!(session.message("a.rs"), Some("feat: first a"));
    assert_eq!(session.message("b.rs"), Some("fix: second b"));
    assert_eq!(vcs.diffed(), vec!["a.rs", "b.rs", "b.rs"]);
    assert!(vcs.committed().is_empty());
}

#[tokio::test]
async fn test_same_seed_same_messages() {
    async fn messages() -> Vec<String> {
        let vcs = Arc::new(FakeVcs::with_files(&["a", "b", "c", "d"]));
        let settings = settings(&["chore:", "refactor:", "feat:", "fix:"], &[]);
        let matcher = IgnoreMatcher::new(&settings);
        let provider = Arc::new(ScriptedProvider::new(&[Some("tweak things")]));
        let generator = Arc::new(CommitMessageGenerator::new(
            provider,
            settings,
            true,
            StdRng::seed_from_u64(1234),
        ));
        let runner = EffectRunner::new(vcs, generator);
        let session = run_headless(&runner, &matcher, HeadlessMode::DryRun).await;
        session
            .files
            .iter()
            .filter_map(|f| session.message(f).map(str::to_string))
            .collect()
    }

    let first = messages().await;
    assert_eq!(first.len(), 4);
    assert_eq!(first, messages().await);
}

#[tokio::test]
async fn test_provider_receives_prompt_built_from_staged_diff() {
    let vcs = Arc::new(FakeVcs::with_files(&["src/lib.rs", "logo.png"]));
    let settings = settings(&["feat:"], &["*.png"]);
    let matcher = IgnoreMatcher::new(&settings);
    let provider = Arc::new(ScriptedProvider::new(&[Some("feat: expose api")]));
    let generator = Arc::new(CommitMessageGenerator::new(
        Arc::clone(&provider) as Arc<dyn luna::llm_providers::LLMProvider>,
        settings,
        false,
        StdRng::seed_from_u64(9),
    ));
    let runner = EffectRunner::new(Arc::clone(&vcs) as Arc<dyn luna::git::Vcs>, generator);

    run_headless(&runner, &matcher, HeadlessMode::DryRun).await;

    let prompts = provider.prompts.lock().clone();
    assert_eq!(
        prompts,
        vec![create_commit_prompt("+++ b/src/lib.rs\n+changed")]
    );
}

#[tokio::test]
async fn test_all_ignored_run_completes_with_no_commits() {
    let vcs = Arc::new(FakeVcs::with_files(&["logo.png", "icon.gif"]));
    let settings = Settings::default();
    let matcher = IgnoreMatcher::new(&settings);
    let runner = runner(Arc::clone(&vcs), &[Some("unused")], settings);

    let session = run_headless(&runner, &matcher, HeadlessMode::CommitAll).await;

    assert_eq!(session.lifecycle, Lifecycle::Complete);
    assert_eq!(session.file_count(), 2);
    assert_eq!(session.committed_count(), 0);
    assert!(vcs.committed().is_empty());
}
