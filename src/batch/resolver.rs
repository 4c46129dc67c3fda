//! # 输出路径解析
//!
//! 为每个输入文件计算唯一的输出路径，并按需创建输出目录。
//!
//! ## 规则
//! - 单个输入 + 显式输出文件：直接使用该文件，忽略命名策略
//! - 其余情况：确定输出基目录，再按命名策略推导文件名
//! - 保留结构时在基目录下重建输入的相对子目录，否则平铺
//! - 输出冲突按 `CollisionPolicy` 处理，绝不静默覆盖
//! - 相同输入、目标和策略，结果完全一致
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 调用
//! - 使用 `batch/naming.rs` 推导文件名

use super::naming::{derive_file_name, numbered_file_name, CollisionPolicy, NamingPolicy};
use super::report::{ErrorKind, ValidationError};
use super::walker::FileEntry;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// 用户指定的输出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Directory(PathBuf),
    File(PathBuf),
}

impl OutputTarget {
    /// 判断输出参数是目录还是文件
    ///
    /// 以路径分隔符结尾、已存在的目录、或没有扩展名的路径视为目录。
    pub fn classify(raw: &str) -> Self {
        let path = PathBuf::from(raw);
        let trailing_sep = raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR);

        if trailing_sep || path.is_dir() || path.extension().is_none() {
            OutputTarget::Directory(path)
        } else {
            OutputTarget::File(path)
        }
    }
}

/// 未指定 `-o` 时的默认输出位置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputDefault {
    /// 输出与各自的输入放在同一目录
    #[default]
    BesideInput,
    Directory(PathBuf),
}

/// 解析选项
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub default: OutputDefault,
    /// dry-run 时关闭目录创建
    pub create_dirs: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default: OutputDefault::BesideInput,
            create_dirs: true,
        }
    }
}

/// 输入到输出的映射，按输入顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputMapping {
    pairs: Vec<(PathBuf, PathBuf)>,
}

impl OutputMapping {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, input: &Path) -> Option<&Path> {
        self.pairs
            .iter()
            .find(|(i, _)| i == input)
            .map(|(_, o)| o.as_path())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.pairs.iter().map(|(i, o)| (i.as_path(), o.as_path()))
    }

    pub fn pairs(&self) -> &[(PathBuf, PathBuf)] {
        &self.pairs
    }

    fn insert(&mut self, input: PathBuf, output: PathBuf) {
        self.pairs.push((input, output));
    }
}

/// 解析结果
#[derive(Debug, Default)]
pub struct Resolution {
    pub mapping: OutputMapping,
    pub errors: Vec<ValidationError>,
}

/// 计算输出映射
pub fn resolve(
    inputs: &[FileEntry],
    target: Option<&OutputTarget>,
    policy: &NamingPolicy,
    options: &ResolveOptions,
) -> Resolution {
    let mut resolution = Resolution::default();
    if inputs.is_empty() {
        return resolution;
    }

    let base = match target {
        Some(OutputTarget::File(file)) => {
            if inputs.len() == 1 {
                resolve_single_file(&inputs[0], file, options, &mut resolution);
            } else {
                resolution.errors.push(
                    ValidationError::new(file, ErrorKind::InvalidOutputTarget).with_detail(
                        format!(
                            "a file output needs exactly one input, got {}",
                            inputs.len()
                        ),
                    ),
                );
            }
            return resolution;
        }
        Some(OutputTarget::Directory(dir)) => Some(absolutize(dir)),
        None => match &options.default {
            OutputDefault::Directory(dir) => Some(absolutize(dir)),
            OutputDefault::BesideInput => None,
        },
    };

    if let Some(base) = &base {
        if base.exists() && !base.is_dir() {
            resolution.errors.push(
                ValidationError::new(base, ErrorKind::InvalidOutputTarget)
                    .with_detail("exists and is not a directory"),
            );
            return resolution;
        }
    }

    let candidates: Vec<(PathBuf, PathBuf)> = inputs
        .iter()
        .map(|entry| {
            let dir = destination_dir(entry, base.as_deref(), policy.preserve_structure);
            let name = entry
                .absolute_path
                .file_name()
                .map(|n| derive_file_name(n, policy))
                .unwrap_or_default();
            (entry.absolute_path.clone(), dir.join(name))
        })
        .collect();

    match policy.on_collision {
        CollisionPolicy::Fail => assign_or_fail(candidates, &mut resolution),
        CollisionPolicy::Rename => assign_with_numbers(candidates, &mut resolution),
    }

    if options.create_dirs {
        create_parent_dirs(&mut resolution);
    }

    resolution
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn destination_dir(entry: &FileEntry, base: Option<&Path>, preserve: bool) -> PathBuf {
    match base {
        Some(base) if preserve => match entry.relative_path.parent() {
            Some(sub) => base.join(sub),
            None => base.to_path_buf(),
        },
        Some(base) => base.to_path_buf(),
        None => entry
            .absolute_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    }
}

fn resolve_single_file(
    entry: &FileEntry,
    file: &Path,
    options: &ResolveOptions,
    resolution: &mut Resolution,
) {
    let output = absolutize(file);
    if output == entry.absolute_path {
        resolution.errors.push(overwrites_input(&entry.absolute_path));
        return;
    }

    resolution
        .mapping
        .insert(entry.absolute_path.clone(), output);
    if options.create_dirs {
        create_parent_dirs(resolution);
    }
}

fn overwrites_input(input: &Path) -> ValidationError {
    ValidationError::new(input, ErrorKind::OutputCollision)
        .with_detail("output would overwrite its own input")
}

/// 冲突即报错：每个被争用的输出报告一次，列出全部相关输入
fn assign_or_fail(candidates: Vec<(PathBuf, PathBuf)>, resolution: &mut Resolution) {
    let mut owners: HashMap<PathBuf, usize> = HashMap::new();
    let mut contested: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    let mut contested_index: HashMap<PathBuf, usize> = HashMap::new();

    for (idx, (input, output)) in candidates.iter().enumerate() {
        if input == output {
            resolution.errors.push(overwrites_input(input));
            continue;
        }
        match owners.get(output) {
            None => {
                owners.insert(output.clone(), idx);
            }
            Some(&first) => {
                let slot = *contested_index.entry(output.clone()).or_insert_with(|| {
                    contested.push((output.clone(), vec![candidates[first].0.clone()]));
                    contested.len() - 1
                });
                contested[slot].1.push(input.clone());
            }
        }
    }

    for (idx, (input, output)) in candidates.into_iter().enumerate() {
        if owners.get(&output) == Some(&idx) {
            resolution.mapping.insert(input, output);
        }
    }

    for (output, inputs) in contested {
        let names = inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        resolution.errors.push(
            ValidationError::new(output, ErrorKind::OutputCollision)
                .with_detail(format!("claimed by {}", names)),
        );
    }
}

/// 冲突时按首次出现顺序追加 `-2`, `-3`, ...
fn assign_with_numbers(candidates: Vec<(PathBuf, PathBuf)>, resolution: &mut Resolution) {
    let natural: HashSet<PathBuf> = candidates.iter().map(|(_, o)| o.clone()).collect();
    let mut taken: HashSet<PathBuf> = HashSet::new();

    for (input, output) in candidates {
        if input == output {
            resolution.errors.push(overwrites_input(&input));
            continue;
        }

        let output = if taken.contains(&output) {
            next_free_name(&output, &natural, &taken)
        } else {
            output
        };
        taken.insert(output.clone());
        resolution.mapping.insert(input, output);
    }
}

fn next_free_name(output: &Path, natural: &HashSet<PathBuf>, taken: &HashSet<PathBuf>) -> PathBuf {
    let dir = output.parent().map(Path::to_path_buf).unwrap_or_default();
    let name: OsString = output.file_name().map(|n| n.to_os_string()).unwrap_or_default();

    let mut n = 2;
    loop {
        let candidate = dir.join(numbered_file_name(&name, n));
        if !natural.contains(&candidate) && !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// 每个不同的输出目录只创建一次
fn create_parent_dirs(resolution: &mut Resolution) {
    let dirs: BTreeSet<PathBuf> = resolution
        .mapping
        .iter()
        .filter_map(|(_, output)| output.parent().map(Path::to_path_buf))
        .collect();

    for dir in dirs {
        if let Err(e) = fs::create_dir_all(&dir) {
            resolution.errors.push(ValidationError::from_io(
                &dir,
                &e,
                ErrorKind::InvalidOutputTarget,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(abs: &Path, rel: &str) -> FileEntry {
        FileEntry {
            absolute_path: abs.to_path_buf(),
            relative_path: PathBuf::from(rel),
        }
    }

    #[test]
    fn test_structure_preserving_batch() {
        let tmp = TempDir::new().unwrap();
        let photos = tmp.path().join("photos");
        let out = tmp.path().join("out");
        let inputs = vec![
            entry(&photos.join("a.jpg"), "a.jpg"),
            entry(&photos.join("b.png"), "b.png"),
            entry(&photos.join("sub/c.jpg"), "sub/c.jpg"),
        ];
        let policy = NamingPolicy::default()
            .with_suffix("-resized")
            .preserve_structure(true);

        let target = OutputTarget::Directory(out.clone());
        let resolution = resolve(&inputs, Some(&target), &policy, &ResolveOptions::default());

        assert!(resolution.errors.is_empty());
        assert_eq!(resolution.mapping.len(), 3);
        assert_eq!(
            resolution.mapping.get(&photos.join("a.jpg")),
            Some(out.join("a-resized.jpg").as_path())
        );
        assert_eq!(
            resolution.mapping.get(&photos.join("b.png")),
            Some(out.join("b-resized.png").as_path())
        );
        assert_eq!(
            resolution.mapping.get(&photos.join("sub/c.jpg")),
            Some(out.join("sub/c-resized.jpg").as_path())
        );
        assert!(out.join("sub").is_dir());
    }

    fn colliding_inputs(root: &Path) -> Vec<FileEntry> {
        vec![
            entry(&root.join("dirA/x.jpg"), "x.jpg"),
            entry(&root.join("dirB/x.jpg"), "x.jpg"),
        ]
    }

    #[test]
    fn test_collision_fails_naming_both_inputs() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let inputs = colliding_inputs(tmp.path());
        let policy = NamingPolicy::default().with_suffix("-opt");

        let target = OutputTarget::Directory(out.clone());
        let resolution = resolve(&inputs, Some(&target), &policy, &ResolveOptions::default());

        assert_eq!(resolution.errors.len(), 1);
        let err = &resolution.errors[0];
        assert_eq!(err.kind, ErrorKind::OutputCollision);
        assert_eq!(err.path, out.join("x-opt.jpg"));
        let detail = err.detail.as_deref().unwrap();
        assert!(detail.contains("dirA"));
        assert!(detail.contains("dirB"));
        assert_eq!(resolution.mapping.len(), 1);
    }

    #[test]
    fn test_collision_rename_is_deterministic() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let inputs = colliding_inputs(tmp.path());
        let policy = NamingPolicy::default()
            .with_suffix("-opt")
            .on_collision(CollisionPolicy::Rename);
        let target = OutputTarget::Directory(out.clone());
        let options = ResolveOptions::default();

        let first = resolve(&inputs, Some(&target), &policy, &options);
        let second = resolve(&inputs, Some(&target), &policy, &options);

        assert!(first.errors.is_empty());
        assert_eq!(first.mapping, second.mapping);
        let outputs: Vec<_> = first.mapping.iter().map(|(_, o)| o.to_path_buf()).collect();
        assert_eq!(outputs, vec![out.join("x-opt.jpg"), out.join("x-opt-2.jpg")]);
    }

    #[test]
    fn test_rename_skips_names_claimed_naturally() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let inputs = vec![
            entry(&tmp.path().join("a/x.jpg"), "x.jpg"),
            entry(&tmp.path().join("b/x.jpg"), "x.jpg"),
            entry(&tmp.path().join("c/x-2.jpg"), "x-2.jpg"),
        ];
        let policy = NamingPolicy::default().on_collision(CollisionPolicy::Rename);
        let target = OutputTarget::Directory(out.clone());

        let resolution = resolve(&inputs, Some(&target), &policy, &ResolveOptions::default());
        let outputs: Vec<_> = resolution
            .mapping
            .iter()
            .map(|(_, o)| o.to_path_buf())
            .collect();
        assert_eq!(
            outputs,
            vec![out.join("x.jpg"), out.join("x-3.jpg"), out.join("x-2.jpg")]
        );
    }

    #[test]
    fn test_explicit_single_file_wins() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("photo.jpg");
        let final_png = tmp.path().join("final.png");
        let policy = NamingPolicy::default()
            .with_suffix("-resized")
            .with_extension("webp");

        let target = OutputTarget::File(final_png.clone());
        let resolution = resolve(
            &[FileEntry::from_file(input.clone())],
            Some(&target),
            &policy,
            &ResolveOptions::default(),
        );

        assert!(resolution.errors.is_empty());
        assert_eq!(resolution.mapping.pairs(), &[(input, final_png)]);
    }

    #[test]
    fn test_file_target_with_many_inputs_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let inputs = colliding_inputs(tmp.path());
        let target = OutputTarget::File(tmp.path().join("final.png"));

        let resolution = resolve(
            &inputs,
            Some(&target),
            &NamingPolicy::default(),
            &ResolveOptions::default(),
        );
        assert!(resolution.mapping.is_empty());
        assert_eq!(resolution.errors[0].kind, ErrorKind::InvalidOutputTarget);
    }

    #[test]
    fn test_flatten_and_new_extension() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let inputs = vec![
            entry(&tmp.path().join("a.png"), "a.png"),
            entry(&tmp.path().join("deep/b.jpg"), "deep/b.jpg"),
        ];
        let policy = NamingPolicy::default().with_extension(".webp");
        let target = OutputTarget::Directory(out.clone());

        let resolution = resolve(&inputs, Some(&target), &policy, &ResolveOptions::default());
        assert_eq!(resolution.mapping.len(), inputs.len());
        assert!(resolution
            .mapping
            .iter()
            .all(|(_, o)| o.extension().and_then(|e| e.to_str()) == Some("webp")));
        assert_eq!(
            resolution.mapping.get(&tmp.path().join("deep/b.jpg")),
            Some(out.join("b.webp").as_path())
        );
    }

    #[test]
    fn test_beside_input_default() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("clips/a.mp4");
        let policy = NamingPolicy::default().with_suffix("-trimmed");

        let resolution = resolve(
            &[FileEntry::from_file(input.clone())],
            None,
            &policy,
            &ResolveOptions::default(),
        );
        assert_eq!(
            resolution.mapping.get(&input),
            Some(tmp.path().join("clips/a-trimmed.mp4").as_path())
        );
    }

    #[test]
    fn test_unchanged_name_beside_input_collides_with_source() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("a.mp4");

        let resolution = resolve(
            &[FileEntry::from_file(input)],
            None,
            &NamingPolicy::default(),
            &ResolveOptions::default(),
        );
        assert!(resolution.mapping.is_empty());
        assert_eq!(resolution.errors[0].kind, ErrorKind::OutputCollision);
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let inputs = vec![entry(&tmp.path().join("sub/a.jpg"), "sub/a.jpg")];
        let policy = NamingPolicy::default()
            .with_suffix("-x")
            .preserve_structure(true);
        let options = ResolveOptions {
            create_dirs: false,
            ..ResolveOptions::default()
        };

        let target = OutputTarget::Directory(out.clone());
        let resolution = resolve(&inputs, Some(&target), &policy, &options);
        assert_eq!(resolution.mapping.len(), 1);
        assert!(!out.exists());
    }

    #[test]
    fn test_base_that_is_a_file_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("out");
        fs::write(&blocker, b"x").unwrap();
        let inputs = colliding_inputs(tmp.path());

        let target = OutputTarget::Directory(blocker);
        let resolution = resolve(
            &inputs,
            Some(&target),
            &NamingPolicy::default().with_suffix("-x"),
            &ResolveOptions::default(),
        );
        assert!(resolution.mapping.is_empty());
        assert_eq!(resolution.errors[0].kind, ErrorKind::InvalidOutputTarget);
    }

    #[test]
    fn test_blocked_subdirectory_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let photos = tmp.path().join("photos");
        let out = tmp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("sub"), b"x").unwrap();
        let inputs = vec![
            entry(&photos.join("a.jpg"), "a.jpg"),
            entry(&photos.join("sub/c.jpg"), "sub/c.jpg"),
        ];
        let policy = NamingPolicy::default()
            .with_suffix("-x")
            .preserve_structure(true);

        let target = OutputTarget::Directory(out.clone());
        let resolution = resolve(&inputs, Some(&target), &policy, &ResolveOptions::default());
        assert_eq!(resolution.errors.len(), 1);
        assert!(resolution.errors[0].is_fatal());
        assert_eq!(resolution.errors[0].path, out.join("sub"));
        assert!(out.join("sub").is_file());
    }

    #[test]
    fn test_classify_target() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("existing.d");
        fs::create_dir(&existing).unwrap();

        assert!(matches!(OutputTarget::classify("out/"), OutputTarget::Directory(_)));
        assert!(matches!(OutputTarget::classify("out"), OutputTarget::Directory(_)));
        assert!(matches!(OutputTarget::classify("final.png"), OutputTarget::File(_)));
        assert!(matches!(
            OutputTarget::classify(existing.to_str().unwrap()),
            OutputTarget::Directory(_)
        ));
    }
}
