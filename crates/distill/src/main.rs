//! distill CLI - Command-line interface for distill-core
//!
//! ARCHITECTURE: Thin I/O layer over distill-core library.
//! This binary handles:
//! - File I/O (reading from disk/stdin)
//! - CLI argument parsing (clap)
//! - Output formatting (stdout/stderr)
//! - Process exit codes
//! - Multi-file glob pattern matching
//! - File-based caching with mtime invalidation

mod cache;
mod tokens;

use clap::Parser;
use distill_core::{
    optimize_auto, optimize_source, CommentsMode, FunctionBodiesMode, ImportsMode, Language, LiteralsMode, Policy, Preset,
};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Maximum input size to prevent memory exhaustion (50MB)
const MAX_INPUT_SIZE: usize = 50 * 1024 * 1024;

/// Maximum number of parallel jobs (threads) to prevent resource exhaustion
const MAX_JOBS: usize = 128;

/// distill - shrink source files into a token-budgeted rendering for LLM context windows
#[derive(Parser, Debug)]
#[command(name = "distill")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    distill file.ts                          Read TypeScript with structure preset (cached)\n  \
    distill file.py --preset signatures      Extract Python public signatures\n  \
    distill file.rs | bat -l rust            Optimize Rust and highlight\n  \
    cat code.ts | distill - --lang=ts        Read from stdin (requires --language)\n  \
    distill - -l python < script.py          Short form language flag\n  \
    distill src/                             Process all files in directory recursively\n  \
    distill 'src/**/*.ts'                    Process all TypeScript files (glob pattern)\n  \
    distill '*.{js,ts}' --no-header          Process multiple files without headers\n  \
    distill . --jobs 8                       Process current directory with 8 threads\n  \
    distill file.ts --target-tokens 500      Escalate elision until output fits 500 tokens\n  \
    distill file.ts --no-cache               Disable caching for a pure optimization\n  \
    distill --clear-cache                    Clear all cached files")]
struct Args {
    /// File, directory, or glob pattern to process (use '-' for stdin)
    #[arg(value_name = "FILE", required_unless_present = "clear_cache")]
    file: Option<String>,

    /// Optimization preset
    #[arg(short, long, value_enum, default_value = "structure")]
    #[arg(help = "Preset: full, structure, signatures, or types")]
    preset: PresetArg,

    /// Override language detection (required for stdin, optional fallback otherwise)
    #[arg(short, long, value_enum)]
    #[arg(help = "Programming language override")]
    language: Option<LanguageArg>,

    /// Override the preset's comment handling
    #[arg(long, value_enum)]
    comments: Option<CommentsArg>,

    /// Override the preset's import handling
    #[arg(long, value_enum)]
    imports: Option<ImportsArg>,

    /// Override the preset's literal handling
    #[arg(long, value_enum)]
    literals: Option<LiteralsArg>,

    /// Per-literal token budget (implies --literals max-tokens)
    #[arg(long, value_name = "N")]
    literals_max_tokens: Option<u32>,

    /// Override the preset's function-body handling
    #[arg(long, value_enum)]
    function_bodies: Option<FunctionBodiesArg>,

    /// Line-count threshold for --function-bodies strip-large
    #[arg(long, value_name = "LINES")]
    function_body_strip_threshold: Option<u32>,

    /// Per-function-body token budget (implies --function-bodies max-tokens)
    #[arg(long, value_name = "N")]
    function_body_max_tokens: Option<u32>,

    /// Keep only public API surface, dropping private declarations entirely
    #[arg(long)]
    public_api_only: bool,

    /// Escalate elision aggressiveness until the output fits this many tokens
    #[arg(long, value_name = "N")]
    target_tokens: Option<usize>,

    /// Disable file headers when processing multiple files
    #[arg(long, help = "Don't print file path headers for multi-file output")]
    no_header: bool,

    /// Number of parallel jobs (default: number of CPUs)
    #[arg(short, long, help = "Number of parallel jobs for multi-file processing")]
    jobs: Option<usize>,

    /// Disable caching (caching is enabled by default for performance)
    #[arg(long, help = "Disable caching of optimized output")]
    no_cache: bool,

    /// Clear the entire cache directory (~/.cache/distill/)
    #[arg(long, help = "Clear all cached files and exit")]
    clear_cache: bool,

    /// Show token count statistics (output to stderr)
    #[arg(long, help = "Show token reduction statistics")]
    show_stats: bool,
}

/// Preset argument (clap value_enum wrapper)
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PresetArg {
    Full,
    Structure,
    Signatures,
    Types,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Full => Preset::Full,
            PresetArg::Structure => Preset::Structure,
            PresetArg::Signatures => Preset::Signatures,
            PresetArg::Types => Preset::Types,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CommentsArg {
    KeepAll,
    KeepDoc,
    KeepFirstSentence,
    StripAll,
}

impl From<CommentsArg> for CommentsMode {
    fn from(arg: CommentsArg) -> Self {
        match arg {
            CommentsArg::KeepAll => CommentsMode::KeepAll,
            CommentsArg::KeepDoc => CommentsMode::KeepDoc,
            CommentsArg::KeepFirstSentence => CommentsMode::KeepFirstSentence,
            CommentsArg::StripAll => CommentsMode::StripAll,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ImportsArg {
    KeepAll,
    SummarizeGroups,
    StripAll,
}

impl From<ImportsArg> for ImportsMode {
    fn from(arg: ImportsArg) -> Self {
        match arg {
            ImportsArg::KeepAll => ImportsMode::KeepAll,
            ImportsArg::SummarizeGroups => ImportsMode::SummarizeGroups,
            ImportsArg::StripAll => ImportsMode::StripAll,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LiteralsArg {
    KeepAll,
    TrimLarge,
}

impl From<LiteralsArg> for LiteralsMode {
    fn from(arg: LiteralsArg) -> Self {
        match arg {
            LiteralsArg::KeepAll => LiteralsMode::KeepAll,
            LiteralsArg::TrimLarge => LiteralsMode::TrimLarge,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FunctionBodiesArg {
    KeepAll,
    StripAll,
}

impl From<FunctionBodiesArg> for FunctionBodiesMode {
    fn from(arg: FunctionBodiesArg) -> Self {
        match arg {
            FunctionBodiesArg::KeepAll => FunctionBodiesMode::KeepAll,
            FunctionBodiesArg::StripAll => FunctionBodiesMode::StripAll,
        }
    }
}

/// Language argument (clap value_enum wrapper)
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LanguageArg {
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
    #[value(alias = "py")]
    Python,
    #[value(alias = "rs")]
    Rust,
    Go,
    Java,
    #[value(alias = "h")]
    C,
    #[value(name = "cpp", alias = "cc")]
    Cpp,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::TypeScript => Language::TypeScript,
            LanguageArg::JavaScript => Language::JavaScript,
            LanguageArg::Python => Language::Python,
            LanguageArg::Rust => Language::Rust,
            LanguageArg::Go => Language::Go,
            LanguageArg::Java => Language::Java,
            LanguageArg::C => Language::C,
            LanguageArg::Cpp => Language::Cpp,
        }
    }
}

/// Build the effective [`Policy`] from the preset plus any per-flag overrides.
fn resolve_policy(args: &Args) -> Policy {
    let mut policy = Preset::from(args.preset).to_policy();

    if let Some(comments) = args.comments {
        policy = policy.with_comments(comments.into());
    }
    if let Some(imports) = args.imports {
        policy = policy.with_imports(imports.into());
    }
    if let Some(n) = args.literals_max_tokens {
        policy = policy.with_literals(LiteralsMode::MaxTokens(n));
    } else if let Some(literals) = args.literals {
        policy = policy.with_literals(literals.into());
    }
    if let Some(n) = args.function_body_max_tokens {
        policy = policy.with_function_bodies(FunctionBodiesMode::MaxTokens(n));
    } else if let Some(threshold) = args.function_body_strip_threshold {
        policy = policy.with_function_bodies(FunctionBodiesMode::StripLarge(threshold));
    } else if let Some(function_bodies) = args.function_bodies {
        policy = policy.with_function_bodies(function_bodies.into());
    }
    if args.public_api_only {
        policy = policy.with_public_api_only(true);
    }
    if let Some(target) = args.target_tokens {
        policy = policy.with_target_tokens(target);
    }

    policy
}

/// Options for processing a file (reduces function parameters)
struct ProcessOptions<'a> {
    /// Resolved optimization policy
    policy: &'a Policy,
    /// Explicit language override (None for auto-detection)
    explicit_lang: Option<Language>,
    /// Whether to use cache
    use_cache: bool,
    /// Whether to include original content for token counting
    include_original: bool,
}

/// Result of processing a file (replaces tuple return)
#[derive(Debug)]
struct ProcessResult {
    /// Optimized output
    output: String,
    /// Original token count (if computed)
    original_tokens: Option<usize>,
    /// Optimized token count (if computed)
    optimized_tokens: Option<usize>,
}

/// Report token statistics to stderr if token counts are available
fn report_token_stats(original_tokens: Option<usize>, optimized_tokens: Option<usize>, suffix: &str) {
    if let (Some(orig), Some(opt)) = (original_tokens, optimized_tokens) {
        let stats = tokens::TokenStats::new(orig, opt);
        eprintln!("\n[distill] {}{suffix}", stats.format());
    }
}

/// Check if path contains glob pattern characters
fn has_glob_pattern(path: &str) -> bool {
    path.contains('*') || path.contains('?') || path.contains('[')
}

/// Validate glob pattern to prevent path traversal attacks
fn validate_glob_pattern(pattern: &str) -> anyhow::Result<()> {
    if pattern.starts_with('/') {
        anyhow::bail!(
            "Glob pattern must be relative (cannot start with '/')\n\
             Pattern: {pattern}\n\
             Use relative paths like 'src/**/*.ts' instead of '/src/**/*.ts'"
        );
    }

    if pattern.contains("..") {
        anyhow::bail!(
            "Glob pattern cannot contain '..' (parent directory traversal)\n\
             Pattern: {pattern}\n\
             This prevents accessing files outside the current directory"
        );
    }

    Ok(())
}

/// Process a single file and return optimized content and optionally token stats
fn process_file(path: &Path, options: &ProcessOptions) -> anyhow::Result<ProcessResult> {
    let cached_result = if options.use_cache {
        cache::read_cache(path, options.policy)
    } else {
        None
    };

    if let Some((ref content, orig_tokens, opt_tokens)) = cached_result {
        if !options.include_original && orig_tokens.is_some() && opt_tokens.is_some() {
            return Ok(ProcessResult {
                output: content.clone(),
                original_tokens: orig_tokens,
                optimized_tokens: opt_tokens,
            });
        }
    }

    let contents = fs::read_to_string(path)?;

    if contents.len() > MAX_INPUT_SIZE {
        anyhow::bail!(
            "File too large: {} bytes exceeds maximum of {} bytes ({}MB)",
            contents.len(),
            MAX_INPUT_SIZE,
            MAX_INPUT_SIZE / 1024 / 1024
        );
    }

    if let Some((content, orig_tokens, opt_tokens)) = cached_result {
        let (orig_tokens, opt_tokens) = if options.include_original && (orig_tokens.is_none() || opt_tokens.is_none()) {
            match (tokens::count_tokens(&contents), tokens::count_tokens(&content)) {
                (Ok(orig), Ok(opt)) => (Some(orig), Some(opt)),
                _ => (None, None),
            }
        } else {
            (orig_tokens, opt_tokens)
        };
        return Ok(ProcessResult {
            output: content,
            original_tokens: orig_tokens,
            optimized_tokens: opt_tokens,
        });
    }

    // Always try auto-detection first, fall back to an explicit language if
    // provided (allows mixed-language directories with a handful of
    // extension-less or unusual-extension edge cases).
    let result = match optimize_auto(&contents, path, options.policy) {
        Ok(result) => result,
        Err(e) => {
            if let Some(language) = options.explicit_lang {
                optimize_source(&contents, language, options.policy)?
            } else {
                return Err(e.into());
            }
        }
    };

    let (orig_tokens, opt_tokens) = if options.include_original {
        match (tokens::count_tokens(&contents), tokens::count_tokens(&result.output)) {
            (Ok(orig), Ok(opt)) => (Some(orig), Some(opt)),
            _ => (None, None),
        }
    } else {
        (None, result.token_count)
    };

    if options.use_cache {
        let _ = cache::write_cache(path, options.policy, &result.output, orig_tokens, opt_tokens);
    }

    Ok(ProcessResult {
        output: result.output,
        original_tokens: orig_tokens,
        optimized_tokens: opt_tokens,
    })
}

/// Options for multi-file processing
struct MultiFileOptions<'a> {
    policy: &'a Policy,
    explicit_lang: Option<Language>,
    no_header: bool,
    jobs: Option<usize>,
    use_cache: bool,
    show_stats: bool,
}

/// Process multiple files (with parallel processing)
///
/// ARCHITECTURE: Generic file processor used by both glob and directory inputs.
/// Handles parallel processing, error aggregation, and statistics.
fn process_files(paths: Vec<PathBuf>, source_description: &str, options: &MultiFileOptions) -> anyhow::Result<()> {
    if paths.is_empty() {
        anyhow::bail!("No files found: {source_description}");
    }

    let process_options = ProcessOptions {
        policy: options.policy,
        explicit_lang: options.explicit_lang,
        use_cache: options.use_cache,
        include_original: options.show_stats,
    };

    let results: Vec<_> = if let Some(num_jobs) = options.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_jobs)
            .build()?
            .install(|| {
                paths
                    .par_iter()
                    .map(|path| (path, process_file(path, &process_options)))
                    .collect()
            })
    } else {
        paths
            .par_iter()
            .map(|path| (path, process_file(path, &process_options)))
            .collect()
    };

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let mut success_count = 0;
    let mut error_count = 0;
    let mut total_original_tokens = 0usize;
    let mut total_optimized_tokens = 0usize;

    for (idx, (path, result)) in results.iter().enumerate() {
        match result {
            Ok(process_result) => {
                if !options.no_header && paths.len() > 1 {
                    if idx > 0 {
                        writeln!(writer)?;
                    }
                    writeln!(writer, "// === {} ===", path.display())?;
                }

                write!(writer, "{}", process_result.output)?;
                success_count += 1;

                if options.show_stats {
                    if let (Some(orig), Some(opt)) = (process_result.original_tokens, process_result.optimized_tokens) {
                        total_original_tokens += orig;
                        total_optimized_tokens += opt;
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {e}", path.display());
                error_count += 1;
            }
        }
    }

    writer.flush()?;

    if success_count == 0 {
        anyhow::bail!("All {error_count} file(s) failed to process");
    }

    if error_count > 0 {
        eprintln!("\nProcessed {success_count} file(s) successfully, {error_count} failed");
    }

    if options.show_stats && total_original_tokens > 0 {
        let suffix = format!(" across {success_count} file(s)");
        report_token_stats(Some(total_original_tokens), Some(total_optimized_tokens), &suffix);
    }

    Ok(())
}

/// Process multiple files matched by glob pattern (with parallel processing)
fn process_glob(pattern: &str, options: &MultiFileOptions) -> anyhow::Result<()> {
    validate_glob_pattern(pattern)?;

    let paths: Vec<_> = glob(pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|p| {
            if !p.is_file() {
                return false;
            }

            // Security: Reject symlinks to prevent access to sensitive files
            // outside the intended working directory.
            if let Ok(metadata) = p.symlink_metadata() {
                if metadata.file_type().is_symlink() {
                    eprintln!("Warning: Skipping symlink: {}", p.display());
                    return false;
                }
            }

            true
        })
        .collect();

    process_files(paths, &format!("pattern '{pattern}'"), options)
}

/// Collect all supported files from a directory recursively
///
/// ARCHITECTURE: Walks directory tree, filters for supported extensions.
/// Uses Language::from_path() for extension validation.
fn collect_files_from_directory(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    fn visit_dir(dir: &Path, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            let symlink_metadata = path.symlink_metadata()?;
            if symlink_metadata.file_type().is_symlink() {
                eprintln!("Warning: Skipping symlink: {}", path.display());
                continue;
            }

            let metadata = entry.metadata()?;

            if metadata.is_dir() {
                visit_dir(&path, files)?;
            } else if metadata.is_file() && Language::from_path(&path).is_some() {
                files.push(path);
            }
        }

        Ok(())
    }

    visit_dir(dir, &mut files)?;
    files.sort();

    Ok(files)
}

/// Process all supported files in a directory recursively
fn process_directory(dir: &Path, options: &MultiFileOptions) -> anyhow::Result<()> {
    let paths = collect_files_from_directory(dir)?;
    process_files(paths, &format!("directory '{}'", dir.display()), options)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if let Some(jobs) = args.jobs {
        if jobs == 0 {
            anyhow::bail!("--jobs must be at least 1");
        }
        if jobs > MAX_JOBS {
            anyhow::bail!(
                "--jobs value too high: {jobs} (maximum: {MAX_JOBS})\n\
                 Using too many threads can exhaust system resources.\n\
                 Recommended: Use default (number of CPUs) or specify a moderate value."
            );
        }
    }

    if args.clear_cache {
        cache::clear_cache()?;
        println!("Cache cleared successfully");
        return Ok(());
    }

    let policy = resolve_policy(&args);
    let explicit_lang = args.language.map(Language::from);
    let use_cache = !args.no_cache;

    let file = args.file.expect("FILE is required");

    if file == "-" {
        let mut buffer = String::new();
        let bytes_read = io::stdin().take(MAX_INPUT_SIZE as u64 + 1).read_to_string(&mut buffer)?;

        if bytes_read > MAX_INPUT_SIZE {
            anyhow::bail!(
                "Input too large: {bytes_read} bytes exceeds maximum of {MAX_INPUT_SIZE} bytes ({}MB)",
                MAX_INPUT_SIZE / 1024 / 1024
            );
        }

        let language = explicit_lang.ok_or_else(|| {
            anyhow::anyhow!(
                "Language detection failed: reading from stdin requires --language flag\n\
                 Example: cat file.ts | distill - --language=typescript"
            )
        })?;

        let result = optimize_source(&buffer, language, &policy)?;

        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write!(writer, "{}", result.output)?;
        writer.flush()?;

        if args.show_stats {
            if let (Ok(orig_tokens), Ok(opt_tokens)) = (tokens::count_tokens(&buffer), tokens::count_tokens(&result.output)) {
                let stats = tokens::TokenStats::new(orig_tokens, opt_tokens);
                eprintln!("\n[distill] {}", stats.format());
            }
        }

        return Ok(());
    }

    let path = PathBuf::from(&file);
    let multi_options = MultiFileOptions {
        policy: &policy,
        explicit_lang,
        no_header: args.no_header,
        jobs: args.jobs,
        use_cache,
        show_stats: args.show_stats,
    };

    if path.is_dir() {
        return process_directory(&path, &multi_options);
    }

    if has_glob_pattern(&file) {
        return process_glob(&file, &multi_options);
    }

    let options = ProcessOptions {
        policy: &policy,
        explicit_lang,
        use_cache,
        include_original: args.show_stats,
    };
    let process_result = process_file(&path, &options)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write!(writer, "{}", process_result.output)?;
    writer.flush()?;

    if args.show_stats {
        report_token_stats(process_result.original_tokens, process_result.optimized_tokens, "");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_glob_pattern() {
        assert!(has_glob_pattern("*.ts"));
        assert!(has_glob_pattern("src/**/*.js"));
        assert!(has_glob_pattern("file?.py"));
        assert!(has_glob_pattern("file[123].rs"));
        assert!(!has_glob_pattern("file.ts"));
        assert!(!has_glob_pattern("src/main.rs"));
    }
}
