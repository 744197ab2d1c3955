
#[cfg(test)]
mod test_timing;
