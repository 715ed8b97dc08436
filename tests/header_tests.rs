use license_header::header::{
  HeaderState, HeaderTemplate, SentinelMode, build_templates, evaluate, license_terms, remove_header, update_header,
};
use license_header::syntax::{LanguageRule, SyntaxTable};

fn to_lines(lines: &[&str]) -> Vec<String> {
  lines.iter().map(|line| (*line).to_string()).collect()
}

fn sample_bodies() -> Vec<Vec<String>> {
  vec![
    vec![],
    to_lines(&["puts 1"]),
    to_lines(&["", "", "body after blank lines"]),
    to_lines(&["/* unrelated comment */", "var x = 1;", "  trailing spaces  "]),
    to_lines(&["<!-- not a header -->", "<p>hi</p>"]),
  ]
}

#[test]
fn test_template_prepended_to_empty_file_is_valid_for_every_rule() {
  let license = "Copyright 2024\n\nLicensed under the Apache License";

  for mode in [SentinelMode::BeginAndEnd, SentinelMode::EndOnly] {
    let templates = build_templates(Some(license), &SyntaxTable::builtin(), mode);
    for (lang, template) in &templates {
      let mut lines = Vec::new();
      update_header(&mut lines, template);
      assert_eq!(evaluate(&lines, Some(template)), HeaderState::Valid, "{lang} in {mode:?}");
    }
  }
}

#[test]
fn test_update_is_idempotent_for_every_rule() {
  let templates = build_templates(Some("Copyright 2024"), &SyntaxTable::builtin(), SentinelMode::BeginAndEnd);

  for template in templates.values() {
    for body in sample_bodies() {
      let mut once = body.clone();
      update_header(&mut once, template);
      let mut twice = once.clone();
      update_header(&mut twice, template);
      assert_eq!(once, twice);
    }
  }
}

#[test]
fn test_remove_after_update_restores_original() {
  for mode in [SentinelMode::BeginAndEnd, SentinelMode::EndOnly] {
    let templates = build_templates(Some("Copyright 2024\nAll rights reserved"), &SyntaxTable::builtin(), mode);

    for (lang, template) in &templates {
      for body in sample_bodies() {
        let mut lines = body.clone();
        update_header(&mut lines, template);
        assert!(remove_header(&mut lines, template));
        assert_eq!(lines, body, "{lang} in {mode:?}");
      }
    }
  }
}

#[test]
fn test_changed_text_around_sentinel_is_stale() {
  let templates = build_templates(Some("Copyright 2024"), &SyntaxTable::builtin(), SentinelMode::BeginAndEnd);

  for (lang, template) in &templates {
    let mut lines = to_lines(&["code"]);
    update_header(&mut lines, template);

    // Rewrite every line except the END sentinel
    for line in lines.iter_mut() {
      if !template.is_end_sentinel(line) {
        line.push_str(" (edited)");
      }
    }

    assert_eq!(evaluate(&lines, Some(template)), HeaderState::Stale, "{lang}");
  }
}

#[test]
fn test_updated_license_text_makes_header_stale() {
  let table = SyntaxTable::builtin();
  let old = build_templates(Some("Copyright 2023"), &table, SentinelMode::EndOnly);
  let new = build_templates(Some("Copyright 2024"), &table, SentinelMode::EndOnly);
  let (old_java, new_java) = (&old["java"], &new["java"]);

  let mut lines = to_lines(&["class A {}"]);
  update_header(&mut lines, old_java);
  assert_eq!(evaluate(&lines, Some(new_java)), HeaderState::Stale);

  update_header(&mut lines, new_java);
  assert_eq!(evaluate(&lines, Some(new_java)), HeaderState::Valid);
  assert_eq!(lines.last().map(String::as_str), Some("class A {}"));
  assert_eq!(lines.len(), new_java.len() + 1);
}

#[test]
fn test_no_template_is_always_not_applicable() {
  for body in sample_bodies() {
    assert_eq!(evaluate(&body, None), HeaderState::NotApplicable);
  }
}

#[test]
fn test_ruby_scenario() {
  let rule = LanguageRule::line("# ", true, &[".rb"]);
  let terms = license_terms(Some("Copyright 2024\nAll rights reserved"));
  let template = HeaderTemplate::build(&rule, &terms, SentinelMode::EndOnly);

  assert_eq!(
    template.lines(),
    to_lines(&[
      "# Copyright 2024",
      "# All rights reserved",
      "# ---  END LICENSE_HEADER BLOCK  ---",
      "",
    ])
  );

  let mut lines = to_lines(&["puts 1"]);
  update_header(&mut lines, &template);
  assert_eq!(
    lines,
    to_lines(&[
      "# Copyright 2024",
      "# All rights reserved",
      "# ---  END LICENSE_HEADER BLOCK  ---",
      "",
      "puts 1",
    ])
  );
  assert_eq!(evaluate(&lines, Some(&template)), HeaderState::Valid);

  remove_header(&mut lines, &template);
  assert_eq!(lines, to_lines(&["puts 1"]));
}

#[test]
fn test_begin_sentinel_does_not_affect_detection() {
  let rule = LanguageRule::line("# ", true, &[".rb"]);
  let with_begin = HeaderTemplate::build(&rule, &["Copyright 2024"], SentinelMode::BeginAndEnd);
  let end_only = HeaderTemplate::build(&rule, &["Copyright 2024"], SentinelMode::EndOnly);

  let mut lines = to_lines(&["puts 1"]);
  update_header(&mut lines, &end_only);

  // Same language, other mode: the block is found, but differs
  assert_eq!(evaluate(&lines, Some(&with_begin)), HeaderState::Stale);
  update_header(&mut lines, &with_begin);
  assert_eq!(evaluate(&lines, Some(&with_begin)), HeaderState::Valid);
  assert_eq!(lines.len(), with_begin.len() + 1);
}
