mod test_individual_link_positions;
