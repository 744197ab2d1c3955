#[cfg(test)]
mod test_filter;
