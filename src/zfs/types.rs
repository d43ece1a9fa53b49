/// One row of `zfs list` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filesystem {
    pub name: String,
    /// Passed through verbatim, including `none`, `legacy` and `-`
    pub mountpoint: String,
    pub used: u64,
    pub avail: u64,
    /// Bytes referenced before compression (`logicalused`)
    pub logical_used: u64,
}
